//! Core types used throughout the system
//!
//! Type aliases that give semantic meaning to the raw integers stored in
//! every backend.

/// Benefit ID - globally unique, immutable after assignment.
///
/// # Constraints:
/// - Assigned by the store at creation (`BIGSERIAL` in PostgreSQL)
/// - **Monotonic**: sorting by id yields creation order
pub type BenefitId = i64;

/// Optimistic-concurrency version token.
///
/// Starts at 0 and increments by exactly one on every successful write.
/// Never used for ordering or display.
pub type Version = i64;

/// Decimal places an amount may carry. PostgreSQL stores `NUMERIC(15, 2)`,
/// so anything finer would be rounded on write.
pub const AMOUNT_SCALE: u32 = 2;
