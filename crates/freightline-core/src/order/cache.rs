//! Order cache repository trait.
//!
//! Whether the per-identity order cache rides along in durable storage
//! is a configuration knob, not a hardcoded assumption. Storage backends
//! configured session-only implement these as no-ops.

use super::model::Order;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// An abstract repository for the per-identity order cache snapshot.
#[async_trait]
pub trait OrderCacheRepository: Send + Sync {
    /// Loads the persisted order cache, keyed by identity id.
    ///
    /// `Ok(None)` when nothing was persisted (including when the
    /// backend is configured not to persist orders at all).
    async fn load_orders(&self) -> Result<Option<HashMap<i64, Vec<Order>>>>;

    /// Persists the order cache snapshot, replacing any previous one.
    async fn save_orders(&self, orders: &HashMap<i64, Vec<Order>>) -> Result<()>;
}
