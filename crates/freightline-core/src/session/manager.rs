//! Session manager.
//!
//! Owns the one mutable [`SessionState`] and serializes every mutation
//! behind a write lock, so login/logout/switch are applied in the order
//! issued even though the surrounding calls are asynchronous. Every
//! committed mutation is written through to the repository before the
//! lock is released, so the persisted record always reflects the
//! last-committed state and never an intermediate one.

use super::model::SessionState;
use super::repository::SessionStateRepository;
use crate::error::{FreightlineError, Result};
use crate::identity::{Credential, Identity};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Manages the set of concurrently logged-in identities.
///
/// `SessionManager` is responsible for:
/// - Registering an identity and its credential on login
/// - Removing one identity on logout and re-electing the active pointer
/// - Switching the active identity without discarding the others
/// - Write-through persistence of every committed mutation
pub struct SessionManager {
    /// The single mutable session state; write access is the only way
    /// any component mutates who is logged in.
    state: RwLock<SessionState>,
    /// Durable storage backend for the session record.
    repository: Arc<dyn SessionStateRepository>,
}

impl SessionManager {
    /// Creates a manager with an empty state, as at process start.
    pub fn new(repository: Arc<dyn SessionStateRepository>) -> Self {
        Self {
            state: RwLock::new(SessionState::new()),
            repository,
        }
    }

    /// Registers an identity and its credential and makes it active.
    ///
    /// Overwrites any previous record for the same id. Other identities
    /// stay registered, so several accounts can be logged in at once.
    ///
    /// # Errors
    ///
    /// Returns [`FreightlineError::InvalidCredential`] without mutating
    /// state when the identity id is missing or the credential is not a
    /// usable bearer string.
    pub async fn login(&self, identity: Identity, credential: Credential) -> Result<()> {
        if identity.id <= 0 {
            return Err(FreightlineError::invalid_credential(
                "login payload has no identity id",
            ));
        }
        if !credential.is_usable() {
            return Err(FreightlineError::invalid_credential(
                "login payload has an empty or sentinel bearer token",
            ));
        }

        let mut state = self.state.write().await;
        let id = identity.id;
        state.identities.insert(id, identity);
        state.credentials.insert(id, credential);
        state.active_id = Some(id);
        debug_assert!(state.is_consistent());

        tracing::info!(identity_id = id, "identity logged in");
        self.repository.save(&state).await
    }

    /// Removes one identity and its credential.
    ///
    /// If the removed identity was active, the smallest remaining id is
    /// re-elected; when no identity remains the active pointer clears.
    /// Logging out an id that was never registered is a no-op.
    pub async fn logout(&self, identity_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        let removed = state.identities.remove(&identity_id).is_some();
        state.credentials.remove(&identity_id);
        if !removed {
            return Ok(());
        }

        if state.active_id == Some(identity_id) {
            state.active_id = state.identities.keys().min().copied();
        }
        debug_assert!(state.is_consistent());

        tracing::info!(
            identity_id,
            new_active = ?state.active_id,
            "identity logged out"
        );
        self.repository.save(&state).await
    }

    /// Changes the active pointer to an already-registered identity.
    ///
    /// Pure pointer change, nothing is removed.
    ///
    /// # Errors
    ///
    /// Returns [`FreightlineError::UnknownIdentity`] and leaves state
    /// unchanged when the id is not registered.
    pub async fn switch_active(&self, identity_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.identities.contains_key(&identity_id) {
            return Err(FreightlineError::unknown_identity(identity_id));
        }
        state.active_id = Some(identity_id);
        debug_assert!(state.is_consistent());

        tracing::debug!(identity_id, "active identity switched");
        self.repository.save(&state).await
    }

    /// Returns the active identity and its credential, or `None` when no
    /// identity is active.
    pub async fn get_active(&self) -> Option<(Identity, Credential)> {
        let state = self.state.read().await;
        let id = state.active_id?;
        let identity = state.identities.get(&id)?.clone();
        let credential = state.credentials.get(&id)?.clone();
        Some((identity, credential))
    }

    /// Returns the active identity's credential at this instant.
    ///
    /// Linearizable with respect to the most recent completed mutation:
    /// the read lock cannot be acquired while a mutation holds the write
    /// lock, so a caller never observes a half-applied switch.
    pub async fn active_credential(&self) -> Option<Credential> {
        let state = self.state.read().await;
        state.active_credential().cloned()
    }

    /// Returns the active identity record.
    pub async fn active_identity(&self) -> Option<Identity> {
        let state = self.state.read().await;
        state.active_identity().cloned()
    }

    /// Returns the active identity id.
    pub async fn active_id(&self) -> Option<i64> {
        self.state.read().await.active_id
    }

    /// Looks up a registered identity by id, active or not.
    pub async fn identity(&self, identity_id: i64) -> Option<Identity> {
        self.state.read().await.identities.get(&identity_id).cloned()
    }

    /// Looks up a registered credential by id, active or not.
    pub async fn credential(&self, identity_id: i64) -> Option<Credential> {
        self.state
            .read()
            .await
            .credentials
            .get(&identity_id)
            .cloned()
    }

    /// Whether the given id is currently registered.
    pub async fn contains(&self, identity_id: i64) -> bool {
        self.state.read().await.identities.contains_key(&identity_id)
    }

    /// Returns a copy of the whole state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Installs a previously persisted state without writing it back.
    ///
    /// Used by rehydration at process start; re-persisting what was just
    /// loaded would be a pointless write.
    pub async fn replace_state(&self, state: SessionState) {
        debug_assert!(state.is_consistent());
        *self.state.write().await = state;
    }
}
