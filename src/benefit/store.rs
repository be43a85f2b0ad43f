//! Balance Store contract
//!
//! The store is the sole authority on benefit state. Every mutation goes
//! through a version-checked write: it succeeds only if the stored version
//! still equals the caller's expected version, and then bumps it by one.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::StoreError;
use super::models::{Benefit, NewBenefit};
use crate::core_types::{AMOUNT_SCALE, BenefitId, Version};

/// Attempts `soft_delete` makes before surfacing a version conflict.
pub const SOFT_DELETE_ATTEMPTS: u32 = 8;

/// Versioned storage for benefit records.
///
/// Implementations must be safe to share across tasks and must never
/// persist a negative amount.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Insert a new record with `active = true`, `version = 0`.
    async fn create(&self, new: NewBenefit) -> Result<Benefit, StoreError>;

    /// Current record and its version token.
    async fn get(&self, id: BenefitId) -> Result<Benefit, StoreError>;

    /// All active records in creation order.
    async fn list_active(&self) -> Result<Vec<Benefit>, StoreError>;

    /// Conditional write of `benefit`'s mutable fields.
    ///
    /// Succeeds only if the stored version equals `expected_version`; the
    /// returned record carries `expected_version + 1`. On mismatch returns
    /// `VersionConflict` and leaves the record untouched.
    async fn put(
        &self,
        benefit: &Benefit,
        expected_version: Version,
    ) -> Result<Benefit, StoreError>;

    /// All-or-nothing conditional write of two distinct records.
    ///
    /// Either both writes land (each version bumped by one) or neither does.
    /// No reader observes one applied without the other.
    async fn put_pair(
        &self,
        first: &Benefit,
        first_expected: Version,
        second: &Benefit,
        second_expected: Version,
    ) -> Result<(Benefit, Benefit), StoreError>;

    /// Mark a record inactive through the versioned write path.
    ///
    /// Re-reads and retries on version conflicts (a concurrent transfer may
    /// have bumped the version). Already-inactive records are returned as-is.
    async fn soft_delete(&self, id: BenefitId) -> Result<Benefit, StoreError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let current = self.get(id).await?;
            if !current.active {
                return Ok(current);
            }

            match self.put(&current.deactivated(), current.version).await {
                Ok(stored) => return Ok(stored),
                Err(StoreError::VersionConflict { actual, .. })
                    if attempt < SOFT_DELETE_ATTEMPTS =>
                {
                    debug!(
                        store = self.name(),
                        id = id,
                        attempt = attempt,
                        actual = actual,
                        "Soft delete raced a concurrent write, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Reject writes that would persist a negative amount or one the
/// `NUMERIC(15, 2)` column would round. Trailing zeros do not count.
pub(crate) fn ensure_storable(amount: Decimal) -> Result<(), StoreError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(StoreError::NegativeAmount(amount));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(StoreError::ExcessScale(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ensure_storable_sign() {
        assert!(ensure_storable(dec!(0)).is_ok());
        assert!(ensure_storable(dec!(-0.00)).is_ok());
        assert!(ensure_storable(dec!(12.34)).is_ok());
        assert_eq!(
            ensure_storable(dec!(-0.01)),
            Err(StoreError::NegativeAmount(dec!(-0.01)))
        );
    }

    #[test]
    fn test_ensure_storable_scale() {
        assert!(ensure_storable(dec!(1.500)).is_ok());
        assert!(ensure_storable(dec!(100.10000)).is_ok());
        assert_eq!(
            ensure_storable(dec!(0.005)),
            Err(StoreError::ExcessScale(dec!(0.005)))
        );
        assert_eq!(
            ensure_storable(dec!(150.001)),
            Err(StoreError::ExcessScale(dec!(150.001)))
        );
    }
}
