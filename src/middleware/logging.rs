//! Logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Log every request with its outcome and tag it with a request ID.
///
/// An incoming `x-request-id` is reused, otherwise a new one is generated.
/// The ID is echoed back on the response.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let request_id = request
        .headers()
        .get(&REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = info_span!("request", id = %request_id, method = %method, path = %path);

    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    span.in_scope(|| {
        if status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms = %duration_ms, "Request completed with server error");
        } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
            warn!(status = status.as_u16(), duration_ms = %duration_ms, "Request completed with client error");
        } else {
            info!(status = status.as_u16(), duration_ms = %duration_ms, "Request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID.clone(), value);
    }

    response
}
