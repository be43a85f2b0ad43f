//! Transfer request, receipt and retry policy types

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use ulid::Ulid;
use utoipa::ToSchema;

use crate::benefit::Benefit;
use crate::core_types::BenefitId;

/// Which leg of a transfer an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "origem"),
            Side::Destination => write!(f, "destino"),
        }
    }
}

/// Transfer request as received from callers.
///
/// Every field may be absent; the engine rejects incomplete requests before
/// touching the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(default, alias = "fromId")]
    #[schema(example = 1)]
    pub source_id: Option<BenefitId>,
    #[serde(default, alias = "toId")]
    #[schema(example = 2)]
    pub dest_id: Option<BenefitId>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "30.00")]
    pub amount: Option<Decimal>,
}

impl TransferRequest {
    pub fn new(source_id: BenefitId, dest_id: BenefitId, amount: Decimal) -> Self {
        Self {
            source_id: Some(source_id),
            dest_id: Some(dest_id),
            amount: Some(amount),
        }
    }
}

/// Outcome of a committed transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Correlation id, also attached to every log line of the transfer
    pub transfer_id: Ulid,
    /// Source record as stored after the debit
    pub source: Benefit,
    /// Destination record as stored after the credit
    pub destination: Benefit,
    pub amount: Decimal,
    /// Read-validate-write rounds needed (1 = no conflict)
    pub attempts: u32,
}

/// Bounded, deterministic retry policy for version conflicts.
///
/// Backoff before attempt `n + 1` is `base * 2^(n - 1)`, capped at `max`.
/// No jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(2);
    pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_millis(50);

    /// `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, backoff_base: Duration, backoff_max: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
            backoff_max,
        }
    }

    /// Retry immediately, no sleeping between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the given failed attempt (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.backoff_base
            .saturating_mul(1u32 << shift)
            .min(self.backoff_max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Self::DEFAULT_BACKOFF_BASE,
            Self::DEFAULT_BACKOFF_MAX,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Source.to_string(), "origem");
        assert_eq!(Side::Destination.to_string(), "destino");
    }

    #[test]
    fn test_request_accepts_both_field_spellings() {
        let a: TransferRequest =
            serde_json::from_str(r#"{"sourceId":1,"destId":2,"amount":"30.00"}"#).unwrap();
        let b: TransferRequest =
            serde_json::from_str(r#"{"fromId":1,"toId":2,"amount":"30.00"}"#).unwrap();
        assert_eq!(a.source_id, Some(1));
        assert_eq!(b.dest_id, Some(2));
        assert_eq!(a.amount, Some(dec!(30.00)));
    }

    #[test]
    fn test_request_missing_fields_are_none() {
        let r: TransferRequest = serde_json::from_str(r#"{"sourceId":1}"#).unwrap();
        assert_eq!(r.dest_id, None);
        assert_eq!(r.amount, None);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let p = RetryPolicy::default();
        assert_eq!(p.backoff(1), Duration::from_millis(2));
        assert_eq!(p.backoff(2), Duration::from_millis(4));
        assert_eq!(p.backoff(3), Duration::from_millis(8));
        assert_eq!(p.backoff(10), Duration::from_millis(50));
        assert_eq!(p.backoff(u32::MAX), Duration::from_millis(50));
    }

    #[test]
    fn test_max_attempts_clamped() {
        assert_eq!(RetryPolicy::immediate(0).max_attempts(), 1);
        assert_eq!(RetryPolicy::immediate(0).backoff(3), Duration::ZERO);
    }
}
