//! Balance Store
//!
//! Durable, versioned storage of benefit records and the sole authority on
//! their current state.
//!
//! - [`BalanceStore`]: the version-checked read/write contract
//! - [`MemoryStore`]: per-record locking, process local
//! - [`PgBalanceStore`]: PostgreSQL, version column guarded updates

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{Benefit, NewBenefit};
pub use postgres::PgBalanceStore;
pub use store::{BalanceStore, SOFT_DELETE_ATTEMPTS};
