//! Transfer Engine
//!
//! Atomic two-balance transfers under optimistic concurrency.
//!
//! # Safety Invariants
//!
//! 1. **Conservation**: `source + destination` is unchanged by a transfer
//! 2. **Non-negative**: no balance ever goes below zero
//! 3. **Atomic pair**: debit and credit land in one store write or not at all
//! 4. **Bounded retry**: version conflicts restart from a fresh read at most
//!    `RetryPolicy::max_attempts` times, then surface as `Conflict`

pub mod engine;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use engine::{TransferEngine, validate_request};
pub use error::TransferError;
pub use types::{RetryPolicy, Side, TransferReceipt, TransferRequest};
