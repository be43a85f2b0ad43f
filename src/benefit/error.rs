//! Balance store error types

use rust_decimal::Decimal;
use thiserror::Error;

use crate::core_types::{BenefitId, Version};

/// Errors surfaced by every `BalanceStore` backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Benefit not found: {0}")]
    NotFound(BenefitId),

    /// The caller's expected version is stale. The record was not touched.
    #[error("Version conflict on benefit {id}: expected {expected}, found {actual}")]
    VersionConflict {
        id: BenefitId,
        expected: Version,
        actual: Version,
    },

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Amount has more than 2 decimal places: {0}")]
    ExcessScale(Decimal),

    #[error("Benefit {0} written twice in one pair write")]
    DuplicateWrite(BenefitId),

    /// The database aborted the transaction (deadlock or serialization
    /// failure). Nothing was written; the caller may retry.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// SQLSTATEs for a transaction the server rolled back to resolve contention:
/// `40001` serialization_failure, `40P01` deadlock_detected.
const CONTENTION_SQLSTATES: [&str; 2] = ["40001", "40P01"];

fn is_contention(sqlstate: Option<&str>) -> bool {
    sqlstate.is_some_and(|code| CONTENTION_SQLSTATES.contains(&code))
}

impl StoreError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "BENEFIT_NOT_FOUND",
            StoreError::VersionConflict { .. } => "VERSION_CONFLICT",
            StoreError::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            StoreError::ExcessScale(_) => "EXCESS_SCALE",
            StoreError::DuplicateWrite(_) => "DUPLICATE_WRITE",
            StoreError::TransactionAborted(_) => "TRANSACTION_ABORTED",
            StoreError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            StoreError::NegativeAmount(_)
            | StoreError::ExcessScale(_)
            | StoreError::DuplicateWrite(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::VersionConflict { .. } | StoreError::TransactionAborted(_) => 409,
            StoreError::Database(_) => 500,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let sqlstate = e.as_database_error().and_then(|db| db.code());
        if is_contention(sqlstate.as_deref()) {
            return StoreError::TransactionAborted(e.to_string());
        }
        StoreError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreError::NotFound(1).code(), "BENEFIT_NOT_FOUND");
        let conflict = StoreError::VersionConflict {
            id: 1,
            expected: 0,
            actual: 1,
        };
        assert_eq!(conflict.code(), "VERSION_CONFLICT");
        assert_eq!(conflict.http_status(), 409);
    }

    #[test]
    fn test_contention_sqlstates() {
        assert!(is_contention(Some("40P01")));
        assert!(is_contention(Some("40001")));
        assert!(!is_contention(Some("23514")));
        assert!(!is_contention(None));
    }

    #[test]
    fn test_retryable_errors_are_conflicts() {
        assert_eq!(StoreError::TransactionAborted("deadlock".into()).http_status(), 409);
        assert_eq!(StoreError::ExcessScale(Decimal::new(5, 3)).http_status(), 400);
    }

    #[test]
    fn test_display() {
        let err = StoreError::VersionConflict {
            id: 4,
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Version conflict on benefit 4: expected 2, found 3"
        );
    }
}
