//! Health check endpoint handlers.
//!
//! Probes go straight to the user store rather than through the service
//! layer, so a failing store is reported even if no request touched it.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use jiff::Timestamp;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Health report with per-component checks
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Health report; `503` when any component is unhealthy.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = check_store(&state).await;
    let status = HealthStatus::Healthy.combine(store.status);

    let mut checks = BTreeMap::new();
    checks.insert("store".to_string(), store);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };
    (code, Json(response))
}

/// Readiness probe: the store must answer.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_store(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe; answers as long as the process serves requests.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_store(state: &AppState) -> ComponentHealth {
    let start = Instant::now();

    match state.store.ping().await {
        Ok(()) => ComponentHealth::healthy("Connected", start.elapsed()),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            ComponentHealth::unhealthy(format!("Store unavailable: {}", e), start.elapsed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::repositories::Repositories;

    fn state() -> AppState {
        AppState::new(
            Repositories::in_memory(),
            JwtConfig::default(),
            "http://localhost:3000/users",
        )
    }

    #[tokio::test]
    async fn test_liveness_check() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_check_with_memory_store() {
        let (status, Json(body)) = health_check(State(state())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, HealthStatus::Healthy);
        assert_eq!(body.checks["store"].status, HealthStatus::Healthy);
        assert_eq!(body.version, crate::pkg_version());
    }

    #[tokio::test]
    async fn test_readiness_check() {
        assert_eq!(readiness_check(State(state())).await, StatusCode::OK);
    }
}
