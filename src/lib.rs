//! Benefit Ledger - named balances with atomic transfers
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (BenefitId, Version)
//! - [`benefit`] - Balance Store: versioned records, memory and PostgreSQL backends
//! - [`transfer`] - Transfer Engine: validation, pair write, conflict retry
//! - [`gateway`] - HTTP request-handling layer
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL connection pool

// Core types - must be first!
pub mod core_types;

pub mod benefit;
pub mod transfer;

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use benefit::{BalanceStore, Benefit, MemoryStore, NewBenefit, PgBalanceStore, StoreError};
pub use core_types::{BenefitId, Version};
pub use transfer::{
    RetryPolicy, Side, TransferEngine, TransferError, TransferReceipt, TransferRequest,
};

/// Git commit the binary was built from
pub const GIT_HASH: &str = env!("GIT_HASH");
