//! Router configuration for the API.
//!
//! Collects the documented routes into one `OpenApiRouter`, mounts
//! Swagger UI next to them and wraps everything in the shared layers.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID - generates/propagates `x-request-id`
/// 2. Logging - one span per request
/// 3. Compression
/// 4. Error fallback - JSON body for bare error responses
/// 5. Timeout - `408` after `request_timeout`
///
/// # Routes
/// - `/users` - user management (see `handlers::users`)
/// - `/health`, `/health/ready`, `/health/live`
/// - `/swagger-ui`, `/api-docs/openapi.json`
///
/// # Example
/// ```ignore
/// let state = AppState::new(Repositories::new(pool), settings.jwt.clone(), settings.server.users_route());
/// let router = create_router(state, Duration::from_secs(settings.server.request_timeout));
/// ```
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/users", handlers::users::user_routes(&state))
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(request_timeout_layer(request_timeout))
        .layer(middleware::from_fn(global_error_handler))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Answers `408 Request Timeout` once `timeout` elapses.
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
