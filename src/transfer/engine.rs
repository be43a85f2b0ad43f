//! Transfer Engine
//!
//! Moves a positive amount between two distinct active benefits.
//!
//! # Flow
//!
//! ```text
//! validate ──▶ read source/dest (+versions) ──▶ check active & funds
//!                      ▲                                │
//!                      │ VersionConflict                 ▼
//!                      └──── backoff ◀──── put_pair(debited, credited)
//! ```
//!
//! The pair write is a single all-or-nothing store call, so no reader ever
//! sees the source debited without the destination credited. Conflicts are
//! retried up to the policy bound and then surface as `Conflict`.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};
use ulid::Ulid;

use super::error::{
    MSG_EXCESS_SCALE, MSG_MISSING_ARGUMENTS, MSG_NON_POSITIVE_AMOUNT, MSG_SAME_BENEFIT,
    TransferError,
};
use super::types::{RetryPolicy, Side, TransferReceipt, TransferRequest};
use crate::benefit::{BalanceStore, Benefit, StoreError};
use crate::core_types::{AMOUNT_SCALE, BenefitId};

/// Fail-fast request checks. Never touches the store.
pub fn validate_request(
    req: &TransferRequest,
) -> Result<(BenefitId, BenefitId, Decimal), TransferError> {
    let (Some(source_id), Some(dest_id), Some(amount)) = (req.source_id, req.dest_id, req.amount)
    else {
        return Err(TransferError::InvalidArgument(MSG_MISSING_ARGUMENTS));
    };

    if amount <= Decimal::ZERO {
        return Err(TransferError::InvalidArgument(MSG_NON_POSITIVE_AMOUNT));
    }

    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(TransferError::InvalidArgument(MSG_EXCESS_SCALE));
    }

    if source_id == dest_id {
        return Err(TransferError::InvalidArgument(MSG_SAME_BENEFIT));
    }

    Ok((source_id, dest_id, amount))
}

/// Business-rule checks on freshly read state.
fn check_eligibility(
    source: &Benefit,
    destination: &Benefit,
    amount: Decimal,
) -> Result<(), TransferError> {
    if !source.active {
        return Err(TransferError::Inactive(Side::Source));
    }
    if !destination.active {
        return Err(TransferError::Inactive(Side::Destination));
    }
    if source.amount < amount {
        return Err(TransferError::InsufficientFunds {
            current: source.amount,
            requested: amount,
        });
    }
    Ok(())
}

/// Outcome of one read-validate-write round
enum Round {
    Committed(Benefit, Benefit),
    Conflicted,
}

/// Transfer Engine - shared across request handlers
pub struct TransferEngine {
    store: Arc<dyn BalanceStore>,
    policy: RetryPolicy,
}

impl TransferEngine {
    /// Create an engine with the default retry policy
    pub fn new(store: Arc<dyn BalanceStore>) -> Self {
        Self::with_policy(store, RetryPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn BalanceStore>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &Arc<dyn BalanceStore> {
        &self.store
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Execute a transfer to completion.
    ///
    /// # Errors
    /// - `InvalidArgument` for missing fields, non-positive amount or same id
    /// - `NotFound` / `Inactive` / `InsufficientFunds` from current state
    /// - `Conflict` once every attempt lost a version race
    pub async fn transfer(&self, req: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        let (source_id, dest_id, amount) = validate_request(req)?;
        let transfer_id = Ulid::new();
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            match self.round(source_id, dest_id, amount).await? {
                Round::Committed(source, destination) => {
                    info!(
                        transfer_id = %transfer_id,
                        source = source_id,
                        dest = dest_id,
                        amount = %amount,
                        attempts = attempt,
                        "Transfer committed"
                    );
                    return Ok(TransferReceipt {
                        transfer_id,
                        source,
                        destination,
                        amount,
                        attempts: attempt,
                    });
                }
                Round::Conflicted if attempt < max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        transfer_id = %transfer_id,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Version conflict, retrying transfer"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Round::Conflicted => {}
            }
        }

        warn!(
            transfer_id = %transfer_id,
            source = source_id,
            dest = dest_id,
            attempts = max_attempts,
            "Transfer aborted: retries exhausted"
        );
        Err(TransferError::Conflict {
            attempts: max_attempts,
        })
    }

    async fn resolve(&self, side: Side, id: BenefitId) -> Result<Benefit, TransferError> {
        match self.store.get(id).await {
            Ok(benefit) => Ok(benefit),
            Err(StoreError::NotFound(_)) => Err(TransferError::NotFound { side, id }),
            Err(e) => Err(e.into()),
        }
    }

    /// One read-validate-write round against fresh state.
    async fn round(
        &self,
        source_id: BenefitId,
        dest_id: BenefitId,
        amount: Decimal,
    ) -> Result<Round, TransferError> {
        let source = self.resolve(Side::Source, source_id).await?;
        let destination = self.resolve(Side::Destination, dest_id).await?;

        check_eligibility(&source, &destination, amount)?;

        let debited = source
            .amount
            .checked_sub(amount)
            .ok_or(TransferError::Overflow)?;
        let credited = destination
            .amount
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        let written = self
            .store
            .put_pair(
                &source.with_amount(debited),
                source.version,
                &destination.with_amount(credited),
                destination.version,
            )
            .await;

        match written {
            Ok((source, destination)) => Ok(Round::Committed(source, destination)),
            Err(StoreError::VersionConflict {
                id,
                expected,
                actual,
            }) => {
                debug!(
                    id = id,
                    expected = expected,
                    actual = actual,
                    "Stale version on pair write"
                );
                Ok(Round::Conflicted)
            }
            Err(StoreError::TransactionAborted(reason)) => {
                debug!(reason = %reason, "Pair write aborted by the database");
                Ok(Round::Conflicted)
            }
            Err(StoreError::NotFound(id)) => {
                let side = if id == source_id {
                    Side::Source
                } else {
                    Side::Destination
                };
                Err(TransferError::NotFound { side, id })
            }
            Err(e) => Err(e.into()),
        }
    }
}
