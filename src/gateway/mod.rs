//! HTTP Gateway
//!
//! Request-handling layer in front of the Balance Store and the Transfer
//! Engine. Routes:
//!
//! ```text
//! GET    /api/v1/health
//! GET    /api/v1/benefits            list active
//! POST   /api/v1/benefits            create
//! GET    /api/v1/benefits/{id}       get
//! PUT    /api/v1/benefits/{id}       versioned update
//! DELETE /api/v1/benefits/{id}       soft delete
//! POST   /api/v1/benefits/transfer   transfer
//! GET    /api-docs/openapi.json
//! ```

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use anyhow::Context;
use axum::{
    Json, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use utoipa::OpenApi;

use state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route(
            "/api/v1/benefits",
            get(handlers::list_benefits).post(handlers::create_benefit),
        )
        .route("/api/v1/benefits/transfer", post(handlers::create_transfer))
        .route(
            "/api/v1/benefits/{id}",
            get(handlers::get_benefit)
                .put(handlers::update_benefit)
                .delete(handlers::delete_benefit),
        )
        .with_state(state)
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
}

/// Bind and serve until the process is stopped
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {} (port already in use?)", addr))?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
