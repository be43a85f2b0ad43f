use std::sync::Arc;

use crate::benefit::BalanceStore;
use crate::db::Database;
use crate::transfer::TransferEngine;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// Balance store, shared with the engine
    pub store: Arc<dyn BalanceStore>,
    /// Transfer engine
    pub engine: Arc<TransferEngine>,
    /// PostgreSQL pool, only for health checks (None = memory store)
    pub pg_db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(engine: Arc<TransferEngine>, pg_db: Option<Arc<Database>>) -> Self {
        Self {
            store: Arc::clone(engine.store()),
            engine,
            pg_db,
        }
    }
}
