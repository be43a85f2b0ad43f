//! Benefit record types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::core_types::{BenefitId, Version};

/// A named balance with an optimistic-concurrency version token.
///
/// # Invariants
/// - `amount >= 0` at every observable point (stores reject negative writes)
/// - `id` never changes once assigned
/// - `version` bumps by one per persisted write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Benefit {
    #[schema(example = 1)]
    pub id: BenefitId,
    #[schema(example = "Vale alimentação")]
    pub name: String,
    pub description: Option<String>,
    /// Exact decimal, serialized as a string
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub active: bool,
    #[schema(example = 0)]
    pub version: Version,
}

impl Benefit {
    /// Copy of this record carrying a different amount.
    pub fn with_amount(&self, amount: Decimal) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Copy of this record with `active = false`.
    pub fn deactivated(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }
}

/// Input for creating a benefit. The store assigns id, `active = true`
/// and `version = 0`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewBenefit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
}

impl NewBenefit {
    pub fn new(name: impl Into<String>, description: Option<&str>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_owned),
            amount,
        }
    }
}
