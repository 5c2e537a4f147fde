//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API,
//! and a fallback middleware that gives bare error responses produced
//! outside the handlers (unknown routes, timeouts) the same JSON shape.

use axum::{
    Json,
    body::to_bytes,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Bodies larger than this are not echoed back in the fallback handler.
const MAX_FALLBACK_BODY: usize = 64 * 1024;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// Server-side failures are logged at `error` with their source chain,
    /// client errors at `warn`. Sources are never sent to the client.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = ?self, code = error_to_code(&self), "Request failed");
        } else {
            tracing::warn!(error = %self, code = error_to_code(&self), "Request rejected");
        }

        (status, Json(error_to_response(&self))).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Forbidden { .. } => "FORBIDDEN",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Builds the client-facing body; internal details are sanitized.
fn error_to_response(error: &AppError) -> ErrorResponse {
    match error {
        AppError::NotFound { entity, field, value } => {
            ErrorResponse::not_found_error(entity, field, value)
        }
        AppError::Duplicate { entity, field, value } => {
            ErrorResponse::duplicate_error(entity, field, value)
        }
        AppError::Validation { field, reason } => ErrorResponse::validation_error(field, reason),
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                .with_details(json!(errors))
        }
        AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
        AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
        AppError::Forbidden { message } => ErrorResponse::new("FORBIDDEN", message),
        AppError::Database { operation, .. } => ErrorResponse::new(
            "DATABASE_ERROR",
            &format!("Database operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => ErrorResponse::new(
            "CONFIGURATION_ERROR",
            &format!("Configuration error: {}", key),
        ),
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
        }
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}

/// Error code used by the fallback handler for a bare status.
fn status_to_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::REQUEST_TIMEOUT => "REQUEST_TIMEOUT",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        s if s.is_server_error() => "INTERNAL_ERROR",
        _ => "UNKNOWN_ERROR",
    }
}

/// Rewrites non-JSON error responses into `ErrorResponse`.
///
/// Responses that already carry a JSON body pass through untouched.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let original = to_bytes(body, MAX_FALLBACK_BODY)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let message = if original.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        original
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    let body = Json(ErrorResponse::new(status_to_code(status), &message));
    (parts, body).into_response()
}
