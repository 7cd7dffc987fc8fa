//! Session state domain model.
//!
//! This is the one piece of global mutable state in the core and the exact
//! shape that gets persisted to durable storage and restored on start.

use crate::identity::{Credential, Identity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every concurrently logged-in account plus the active-identity pointer.
///
/// Invariant: every key in `credentials` has a matching key in `identities`,
/// and `active_id`, when set, is a key in `identities`. `active_id` is the
/// sole source of truth for "who is currently acting".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Registered identities, keyed by identity id.
    #[serde(rename = "identitiesById")]
    pub identities: HashMap<i64, Identity>,
    /// Bearer credentials, keyed by identity id.
    #[serde(rename = "credentialsById")]
    pub credentials: HashMap<i64, Credential>,
    /// The identity on whose behalf the next outbound request is made.
    pub active_id: Option<i64>,
}

impl SessionState {
    /// Creates an empty state, as at process start before rehydration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the map-consistency invariant.
    pub fn is_consistent(&self) -> bool {
        let credentials_match = self
            .credentials
            .keys()
            .all(|id| self.identities.contains_key(id));
        let active_valid = match self.active_id {
            Some(id) => self.identities.contains_key(&id),
            None => true,
        };
        credentials_match && active_valid
    }

    /// Whether no identity is registered at all.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// The active identity record, if an active id is set.
    pub fn active_identity(&self) -> Option<&Identity> {
        self.active_id.and_then(|id| self.identities.get(&id))
    }

    /// The active identity's credential, if an active id is set.
    pub fn active_credential(&self) -> Option<&Credential> {
        self.active_id.and_then(|id| self.credentials.get(&id))
    }
}
