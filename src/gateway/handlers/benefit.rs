//! Benefit CRUD handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, BenefitUpdate, ok};
use crate::benefit::{Benefit, NewBenefit};
use crate::core_types::BenefitId;

/// List active benefits
///
/// GET /api/v1/benefits
#[utoipa::path(
    get,
    path = "/api/v1/benefits",
    responses(
        (status = 200, description = "Active benefits in creation order", body = [Benefit])
    ),
    tag = "Benefit"
)]
pub async fn list_benefits(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Benefit>> {
    let benefits = state.store.list_active().await?;
    ok(benefits)
}

/// Get one benefit (active or not)
///
/// GET /api/v1/benefits/{id}
#[utoipa::path(
    get,
    path = "/api/v1/benefits/{id}",
    params(("id" = i64, Path, description = "Benefit id")),
    responses(
        (status = 200, description = "Benefit", body = Benefit),
        (status = 404, description = "Benefit not found")
    ),
    tag = "Benefit"
)]
pub async fn get_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BenefitId>,
) -> ApiResult<Benefit> {
    let benefit = state.store.get(id).await?;
    ok(benefit)
}

/// Create a benefit
///
/// POST /api/v1/benefits
#[utoipa::path(
    post,
    path = "/api/v1/benefits",
    request_body = NewBenefit,
    responses(
        (status = 200, description = "Created benefit", body = Benefit),
        (status = 400, description = "Negative amount")
    ),
    tag = "Benefit"
)]
pub async fn create_benefit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBenefit>,
) -> ApiResult<Benefit> {
    let benefit = state.store.create(req).await?;
    tracing::info!(id = benefit.id, "Benefit created");
    ok(benefit)
}

/// Update a benefit, guarded by the body's version
///
/// PUT /api/v1/benefits/{id}
#[utoipa::path(
    put,
    path = "/api/v1/benefits/{id}",
    params(("id" = i64, Path, description = "Benefit id")),
    request_body = BenefitUpdate,
    responses(
        (status = 200, description = "Updated benefit", body = Benefit),
        (status = 404, description = "Benefit not found"),
        (status = 409, description = "Stale version")
    ),
    tag = "Benefit"
)]
pub async fn update_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BenefitId>,
    Json(req): Json<BenefitUpdate>,
) -> ApiResult<Benefit> {
    let expected = req.version;
    let stored = state.store.put(&req.into_benefit(id), expected).await?;
    ok(stored)
}

/// Soft-delete a benefit
///
/// DELETE /api/v1/benefits/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/benefits/{id}",
    params(("id" = i64, Path, description = "Benefit id")),
    responses(
        (status = 204, description = "Benefit deactivated"),
        (status = 404, description = "Benefit not found")
    ),
    tag = "Benefit"
)]
pub async fn delete_benefit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<BenefitId>,
) -> Result<StatusCode, ApiError> {
    state.store.soft_delete(id).await?;
    tracing::info!(id = id, "Benefit deactivated");
    Ok(StatusCode::NO_CONTENT)
}
