//! Health Handlers
//!
//! Database connectivity and connection pool diagnostics.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::domain::models::pool::PoolStatus;
use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub backend: String,
}

/// Create the router for health endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/pool", get(pool_status))
}

/// GET /health - Database connectivity check
///
/// # Responses
///
/// * 200 OK - Database answered the liveness query
/// * 503 Service Unavailable - Database unreachable
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = state.check_connection_use_case.execute().await;

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            database: healthy,
            backend: state.gateway.backend().to_string(),
        }),
    )
}

/// GET /health/pool - Connection pool counters
async fn pool_status(State(state): State<AppState>) -> Json<PoolStatus> {
    Json(state.pool_status_use_case.log())
}
