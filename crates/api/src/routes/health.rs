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
    /// Jobs currently held by the registry, finished or not.
    pub tracked_jobs: usize,
    /// Workers currently running a work unit.
    pub busy_workers: usize,
}

/// GET /health -- returns service health and registry occupancy.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tracked_jobs: state.registry.len().await,
        busy_workers: state.registry.engine().busy_workers(),
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
