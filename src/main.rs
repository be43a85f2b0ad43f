//! Benefit Ledger server
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Store   │───▶│  Engine  │───▶│ Gateway  │
//! │  (YAML)  │    │ (PG/RAM) │    │  (OCC)   │    │  (HTTP)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `benefit_ledger [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;
use benefit_ledger::benefit::{BalanceStore, MemoryStore, PgBalanceStore};
use benefit_ledger::config::AppConfig;
use benefit_ledger::db::Database;
use benefit_ledger::gateway::{self, state::AppState};
use benefit_ledger::transfer::TransferEngine;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = benefit_ledger::logging::init_logging(&app_config);

    tracing::info!(
        "Starting Benefit Ledger in {} mode (git {})",
        env,
        benefit_ledger::GIT_HASH
    );

    let (store, pg_db): (Arc<dyn BalanceStore>, Option<Arc<Database>>) =
        match app_config.postgres_url.as_deref() {
            Some(url) => {
                let db = Arc::new(
                    Database::connect(url, &app_config.postgres_pool)
                        .await
                        .context("Failed to connect to PostgreSQL")?,
                );
                let store = PgBalanceStore::new(db.pool().clone());
                store.ensure_schema().await?;
                (Arc::new(store), Some(db))
            }
            None => {
                tracing::warn!("postgres_url not set, balances are kept in memory only");
                (Arc::new(MemoryStore::new()), None)
            }
        };

    let policy = app_config.transfer.retry_policy();
    tracing::info!(
        store = store.name(),
        max_attempts = policy.max_attempts(),
        "Balance store ready"
    );

    let engine = Arc::new(TransferEngine::with_policy(store, policy));
    let state = Arc::new(AppState::new(engine, pg_db));

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state).await
}
