//! API Middleware
//!
//! Request correlation and logging middleware.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::domain::OperationContext;

/// Header carrying the request correlation ID
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

// =========================================================================
// Correlation Middleware
// =========================================================================

/// Attach an `OperationContext` to the request.
///
/// Reuses a valid `X-Correlation-Id` from the caller or generates a new one,
/// and echoes it on the response.
pub async fn correlation_middleware(mut request: Request<Body>, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let context = OperationContext::new().with_correlation_id(correlation_id);
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}

// =========================================================================
// Header selection for logs
// =========================================================================

/// Request headers worth recording. Anything else (cookies a browser attaches
/// to the form's origin, proxy credentials) stays out of the logs.
const LOGGED_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "user-agent",
    "origin",
    "referer",
    "x-forwarded-for",
    CORRELATION_ID_HEADER,
];

/// Keep only the headers listed in `LOGGED_HEADERS`
pub fn loggable_headers(headers: &HeaderMap) -> Vec<(&'static str, String)> {
    LOGGED_HEADERS
        .iter()
        .filter_map(|&name| {
            let value = headers.get(name)?;
            Some((name, value.to_str().unwrap_or("[invalid utf8]").to_string()))
        })
        .collect()
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let headers = loggable_headers(request.headers());

    let correlation_id = request
        .extensions()
        .get::<OperationContext>()
        .map(|ctx| ctx.correlation_id);

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        version = ?version,
        correlation_id = ?correlation_id,
        headers = ?headers,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        correlation_id = ?correlation_id,
        "Request completed"
    );

    response
}
