//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};

/// Health check response data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// Active store backend
    #[schema(example = "memory")]
    pub store: String,
    /// PostgreSQL round trip, absent for the memory store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_latency_us: Option<u64>,
}

/// Health check endpoint
///
/// - Healthy: 200 OK + {code: 0, data: {timestamp_ms, store, db_latency_us?}}
/// - Unhealthy: 503 Service Unavailable + {code: 5001, msg: "unavailable"}
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (
            status = 200,
            description = "Service healthy",
            body = HealthResponse,
            content_type = "application/json"
        ),
        (status = 503, description = "Database unreachable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let db_latency_us = match state.pg_db.as_deref() {
        None => None,
        Some(db) => match db.ping().await {
            Ok(latency) => Some(latency.as_micros() as u64),
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ApiResponse {
                        code: error_codes::SERVICE_UNAVAILABLE,
                        msg: "unavailable".to_string(),
                        data: None,
                    }),
                );
            }
        },
    };

    let data = HealthResponse {
        timestamp_ms: chrono::Utc::now().timestamp_millis(),
        store: state.store.name().to_string(),
        db_latency_us,
    };
    (StatusCode::OK, Json(ApiResponse::success(data)))
}
