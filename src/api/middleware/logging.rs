//! Logging middleware for request/response tracing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};

use super::RequestId;

/// Logs each request and its outcome inside an `http_request` span.
///
/// The span carries method, path and request id; the completion event
/// adds status and duration. 5xx responses are logged at `warn`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id
    );

    async move {
        info!("Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if response.status().is_server_error() {
            warn!(status, duration_ms, "Response sent");
        } else {
            info!(status, duration_ms, "Response sent");
        }

        response
    }
    .instrument(span)
    .await
}
