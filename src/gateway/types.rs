//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError`: error half of every handler result
//! - `error_codes`: Standard error code constants
//! - Request/response DTOs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::benefit::{Benefit, StoreError};
use crate::core_types::{BenefitId, Version};
use crate::transfer::{TransferError, TransferReceipt};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = 0)]
    pub code: i32,
    #[schema(example = "ok")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 OK with the success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// Error response: HTTP status + envelope code + message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

fn status_of(http_status: u16) -> StatusCode {
    StatusCode::from_u16(http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let code = match e {
            StoreError::NotFound(_) => error_codes::NOT_FOUND,
            StoreError::VersionConflict { .. } | StoreError::TransactionAborted(_) => {
                error_codes::VERSION_CONFLICT
            }
            StoreError::NegativeAmount(_)
            | StoreError::ExcessScale(_)
            | StoreError::DuplicateWrite(_) => error_codes::INVALID_PARAMETER,
            StoreError::Database(_) => error_codes::INTERNAL_ERROR,
        };
        Self::new(status_of(e.http_status()), code, e.to_string())
    }
}

impl From<TransferError> for ApiError {
    fn from(e: TransferError) -> Self {
        let code = match &e {
            TransferError::InvalidArgument(_) | TransferError::Overflow => {
                error_codes::INVALID_PARAMETER
            }
            TransferError::InsufficientFunds { .. } => error_codes::INSUFFICIENT_BALANCE,
            TransferError::Inactive(_) => error_codes::BENEFIT_INACTIVE,
            TransferError::NotFound { .. } => error_codes::NOT_FOUND,
            TransferError::Conflict { .. } => error_codes::VERSION_CONFLICT,
            TransferError::Store(_) => error_codes::INTERNAL_ERROR,
        };
        Self::new(
            status_of(e.http_status()),
            code,
            format!("Erro na transferência: {}", e),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

/// Administrative update. `version` is the expected version token; a stale
/// value is rejected with 409.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BenefitUpdate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub active: bool,
    #[schema(example = 0)]
    pub version: Version,
}

impl BenefitUpdate {
    pub fn into_benefit(self, id: BenefitId) -> Benefit {
        Benefit {
            id,
            name: self.name,
            description: self.description,
            amount: self.amount,
            active: self.active,
            version: self.version,
        }
    }
}

pub const TRANSFER_OK_MESSAGE: &str = "Transferência realizada com sucesso";

/// Transfer response data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponseData {
    #[schema(example = "01JAB3X5Y7Z9A1B3C5D7E9F1G3")]
    pub transfer_id: String,
    #[schema(example = "Transferência realizada com sucesso")]
    pub message: String,
    pub source: Benefit,
    pub destination: Benefit,
    #[schema(value_type = String, example = "30.00")]
    pub amount: Decimal,
    pub attempts: u32,
}

impl From<TransferReceipt> for TransferResponseData {
    fn from(r: TransferReceipt) -> Self {
        Self {
            transfer_id: r.transfer_id.to_string(),
            message: TRANSFER_OK_MESSAGE.to_string(),
            source: r.source,
            destination: r.destination,
            amount: r.amount,
            attempts: r.attempts,
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const BENEFIT_INACTIVE: i32 = 1003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;
    pub const VERSION_CONFLICT: i32 = 4009;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::Side;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transfer_error_mapping() {
        let e: ApiError = TransferError::InsufficientFunds {
            current: dec!(100.00),
            requested: dec!(150.00),
        }
        .into();
        assert_eq!(e.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(e.code, error_codes::INSUFFICIENT_BALANCE);
        assert_eq!(
            e.msg,
            "Erro na transferência: Saldo insuficiente. Saldo atual: 100.00, Valor solicitado: 150.00"
        );

        let e: ApiError = TransferError::NotFound {
            side: Side::Destination,
            id: 3,
        }
        .into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_mapping() {
        let e: ApiError = StoreError::VersionConflict {
            id: 1,
            expected: 0,
            actual: 2,
        }
        .into();
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.code, error_codes::VERSION_CONFLICT);

        let e: ApiError = StoreError::Database("down".into()).into();
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error(1001, "bad")).unwrap();
        assert_eq!(json["code"], 1001);
        assert!(json.get("data").is_none());
    }
}
