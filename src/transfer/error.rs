//! Transfer Error Types
//!
//! Display strings are the client-facing messages; the gateway forwards
//! them verbatim.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::Side;
use crate::benefit::StoreError;
use crate::core_types::BenefitId;

pub const MSG_MISSING_ARGUMENTS: &str = "IDs e valor não podem ser nulos";
pub const MSG_NON_POSITIVE_AMOUNT: &str = "Valor deve ser positivo";
pub const MSG_EXCESS_SCALE: &str = "Valor deve ter no máximo 2 casas decimais";
pub const MSG_SAME_BENEFIT: &str = "Não é possível transferir para o mesmo benefício";

/// Transfer error types
///
/// Everything except `Conflict` is deterministic: retrying the same request
/// cannot succeed, so the engine never does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    // === Validation Errors (no store access) ===
    #[error("{0}")]
    InvalidArgument(&'static str),

    // === Resolution / State Errors ===
    #[error("Benefício {side} não encontrado: {id}")]
    NotFound { side: Side, id: BenefitId },

    #[error("Benefício {0} está inativo")]
    Inactive(Side),

    #[error("Saldo insuficiente. Saldo atual: {current}, Valor solicitado: {requested}")]
    InsufficientFunds { current: Decimal, requested: Decimal },

    #[error("Valor excede o limite suportado")]
    Overflow,

    // === Concurrency ===
    #[error("Conflito de concorrência: transferência abortada após {attempts} tentativas")]
    Conflict { attempts: u32 },

    // === System Errors ===
    #[error("Erro de armazenamento: {0}")]
    Store(#[from] StoreError),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidArgument(_) => "INVALID_ARGUMENT",
            TransferError::NotFound { .. } => "BENEFIT_NOT_FOUND",
            TransferError::Inactive(_) => "BENEFIT_INACTIVE",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::Overflow => "OVERFLOW",
            TransferError::Conflict { .. } => "CONFLICT",
            TransferError::Store(e) => e.code(),
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidArgument(_) | TransferError::Overflow => 400,
            TransferError::NotFound { .. } => 404,
            TransferError::Conflict { .. } => 409,
            TransferError::Inactive(_) | TransferError::InsufficientFunds { .. } => 422,
            TransferError::Store(e) => e.http_status(),
        }
    }
}
