//! Transfer handler

use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, TransferResponseData, ok};
use crate::transfer::TransferRequest;

/// Transfer between two benefits
///
/// POST /api/v1/benefits/transfer
#[utoipa::path(
    post,
    path = "/api/v1/benefits/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferResponseData),
        (status = 400, description = "Missing fields, non-positive amount or same benefit"),
        (status = 404, description = "Source or destination not found"),
        (status = 409, description = "Retries exhausted under contention"),
        (status = 422, description = "Inactive benefit or insufficient funds")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferRequest>,
) -> ApiResult<TransferResponseData> {
    match state.engine.transfer(&req).await {
        Ok(receipt) => ok(receipt.into()),
        Err(e) => {
            tracing::warn!(code = e.code(), "Transfer rejected: {}", e);
            ApiError::from(e).into_err()
        }
    }
}
