use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the availability API answered its health endpoint.
    pub upstream_healthy: bool,
}

/// GET /health -- returns service and availability API health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_healthy = state.availability.health_check().await.is_ok();

    let status = if upstream_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        upstream_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
