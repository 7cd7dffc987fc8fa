//! File-backed persistence adapter for the session record.
//!
//! One namespaced JSON document holds the serialized session state and,
//! when so configured, a snapshot of the per-identity order cache. A
//! missing document is a successful empty load, not a failure: a fresh
//! install rehydrates to an empty session.

use crate::paths::FreightlinePaths;
use async_trait::async_trait;
use freightline_core::error::Result;
use freightline_core::order::cache::OrderCacheRepository;
use freightline_core::order::model::Order;
use freightline_core::session::model::SessionState;
use freightline_core::session::repository::SessionStateRepository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Which application state rides along in the durable record.
///
/// Defaults to `SessionOnly`; the order cache is rebuilt from the
/// backend on demand unless a deployment opts into persisting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistScope {
    #[default]
    SessionOnly,
    SessionAndOrders,
}

/// The single on-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    session: SessionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    orders_by_identity: Option<HashMap<i64, Vec<Order>>>,
}

/// JSON-file implementation of the session persistence adapter.
pub struct JsonSessionStore {
    file_path: PathBuf,
    scope: PersistScope,
    /// Session and order saves each read-modify-write the same document
    /// from different components; cycles must not interleave.
    io_lock: Mutex<()>,
}

impl JsonSessionStore {
    /// Creates a store writing to the given file, creating the parent
    /// directory if needed.
    pub fn new(file_path: impl AsRef<Path>, scope: PersistScope) -> Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file_path,
            scope,
            io_lock: Mutex::new(()),
        })
    }

    /// Creates a store at the default platform location
    /// (`<config dir>/freightline/session.json`).
    pub fn default_location(scope: PersistScope) -> Result<Self> {
        Self::new(FreightlinePaths::session_file()?, scope)
    }

    fn read_record(&self) -> Result<Option<PersistedRecord>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.file_path)?;
        let record: PersistedRecord = serde_json::from_str(&raw)?;
        Ok(Some(record))
    }

    fn write_record(&self, record: &PersistedRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.file_path, json)?;
        tracing::debug!(path = %self.file_path.display(), "session record persisted");
        Ok(())
    }
}

#[async_trait]
impl SessionStateRepository for JsonSessionStore {
    async fn load(&self) -> Result<Option<SessionState>> {
        Ok(self.read_record()?.map(|record| record.session))
    }

    async fn save(&self, state: &SessionState) -> Result<()> {
        let _guard = self.io_lock.lock().unwrap_or_else(|e| e.into_inner());
        // Keep a previously persisted order snapshot when orders are in
        // scope; a session write must not wipe it.
        let orders_by_identity = match self.scope {
            PersistScope::SessionOnly => None,
            PersistScope::SessionAndOrders => self
                .read_record()?
                .and_then(|record| record.orders_by_identity),
        };
        self.write_record(&PersistedRecord {
            session: state.clone(),
            orders_by_identity,
        })
    }
}

#[async_trait]
impl OrderCacheRepository for JsonSessionStore {
    async fn load_orders(&self) -> Result<Option<HashMap<i64, Vec<Order>>>> {
        if self.scope == PersistScope::SessionOnly {
            return Ok(None);
        }
        Ok(self
            .read_record()?
            .and_then(|record| record.orders_by_identity))
    }

    async fn save_orders(&self, orders: &HashMap<i64, Vec<Order>>) -> Result<()> {
        if self.scope == PersistScope::SessionOnly {
            return Ok(());
        }
        let _guard = self.io_lock.lock().unwrap_or_else(|e| e.into_inner());
        let session = self
            .read_record()?
            .map(|record| record.session)
            .unwrap_or_default();
        self.write_record(&PersistedRecord {
            session,
            orders_by_identity: Some(orders.clone()),
        })
    }
}
