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
    /// Whether a database connection string was configured.
    pub db_configured: bool,
    /// Whether the database is reachable (`false` when not configured).
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
///
/// The service itself is up whenever this answers; an unconfigured store is
/// still `ok`, an unreachable configured one is `degraded`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db_configured, db_healthy) = match &state.pool {
        Some(pool) => (true, recwatch_db::health_check(pool).await.is_ok()),
        None => (false, false),
    };

    let status = if db_configured && !db_healthy {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_configured,
        db_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
