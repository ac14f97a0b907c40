pub mod batch;
pub mod fetch;
pub mod http;

use std::sync::{Arc, Mutex};

use lumen_audit::AuditEngine;
use lumen_core::config::LumenConfig;
use lumen_core::sqlite::SqliteHistoryStore;
use lumen_core::types::AuditError;

use crate::batch::{BatchRunner, SharedStore};
use crate::fetch::UreqFetcher;

/// Shared server state: the audit engine, the history store and the
/// batch runner that ties them together.
///
/// The store sits behind `std::sync::Mutex` because `rusqlite::Connection`
/// is `!Send`-friendly only through exclusive access — keep critical
/// sections short. The engine itself is freely shared; its rule set has
/// its own interior lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AuditEngine>,
    pub store: SharedStore,
    pub runner: Arc<BatchRunner>,
}

impl AppState {
    /// Create server state backed by a database file.
    pub fn open(db_path: &str, config: LumenConfig) -> Result<Self, AuditError> {
        let store = SqliteHistoryStore::open(db_path)?;
        Ok(Self::from_store(store, config))
    }

    /// Create server state with an in-memory store (testing).
    pub fn in_memory(config: LumenConfig) -> Result<Self, AuditError> {
        let store = SqliteHistoryStore::in_memory()?;
        Ok(Self::from_store(store, config))
    }

    fn from_store(store: SqliteHistoryStore, config: LumenConfig) -> Self {
        let engine = Arc::new(AuditEngine::new(config));
        let store: SharedStore = Arc::new(Mutex::new(store));
        let runner = Arc::new(BatchRunner::new(
            Arc::clone(&engine),
            Arc::clone(&store),
            Arc::new(UreqFetcher),
        ));
        Self {
            engine,
            store,
            runner,
        }
    }
}
