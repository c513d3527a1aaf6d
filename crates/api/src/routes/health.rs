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
    /// Whether the hosted data layer is configured.
    pub upstream_configured: bool,
}

/// GET /health -- returns service status.
///
/// The server holds no connections of its own, so health only reports
/// whether the upstream credentials are present.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_configured = state.upstream().is_ok();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        upstream_configured,
    })
}

/// Mount health check routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
