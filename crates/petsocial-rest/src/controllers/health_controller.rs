//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use futures::future::join_all;
use petsocial_core::HealthStatus;
use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Result of one readiness probe.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}

/// Liveness: the process is up and serving.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness: runs every registered probe. Any unhealthy probe makes the
/// instance unready; degraded probes are reported but still ready.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let statuses = join_all(state.health_checks.iter().map(|check| check.check())).await;

    let checks: Vec<ComponentHealth> = state
        .health_checks
        .iter()
        .zip(statuses.iter())
        .map(|(check, status)| ComponentHealth {
            name: check.name().to_string(),
            status: status.as_str().to_string(),
            message: match status {
                HealthStatus::Healthy => None,
                HealthStatus::Degraded(msg) | HealthStatus::Unhealthy(msg) => Some(msg.clone()),
            },
        })
        .collect();

    let (code, overall) = if statuses.iter().any(HealthStatus::is_unhealthy) {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    } else if statuses.iter().all(HealthStatus::is_healthy) {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::OK, "degraded")
    };

    (
        code,
        Json(ReadinessResponse {
            status: overall.to_string(),
            checks,
        }),
    )
}
