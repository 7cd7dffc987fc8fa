//! Session state repository trait.
//!
//! Defines the interface for persisting the session state to durable
//! storage, decoupling the session manager from the storage mechanism
//! (JSON file, browser storage bridge, in-memory test double).

use super::model::SessionState;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the persisted session record.
#[async_trait]
pub trait SessionStateRepository: Send + Sync {
    /// Loads the previously persisted session state.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(state))`: a record was found and deserialized
    /// - `Ok(None)`: no record exists yet ("no data" is a successful
    ///   empty load, not a failure)
    /// - `Err(_)`: the record exists but could not be read
    async fn load(&self) -> Result<Option<SessionState>>;

    /// Persists the given state, replacing any previous record.
    async fn save(&self, state: &SessionState) -> Result<()>;
}
