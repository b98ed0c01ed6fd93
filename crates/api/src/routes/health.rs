use axum::extract::State;
use axum::{routing::get, Json, Router};
use portal_db::repositories::{SessionRepo, UserRepo};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Users in the directory.
    pub users: usize,
    /// Stored sessions, including expired ones not yet swept.
    pub sessions: usize,
}

/// GET /health -- returns service status and store sizes.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        users: UserRepo::count(&state.pool).await,
        sessions: SessionRepo::count(&state.pool).await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
