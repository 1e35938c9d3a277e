//! Request span construction for `tower_http::trace::TraceLayer`.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use tower_http::trace::{DefaultOnResponse, OnResponse};
use tracing::{Level, Span};

/// Span for one HTTP request.
///
/// `request_id` is filled in by the request ID middleware; `status` and
/// `latency_ms` by [`record_response`].
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    )
}

/// Record the outcome on the request span and log it at info level.
pub fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", response.status().as_u16());
    span.record(
        "latency_ms",
        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    );
    DefaultOnResponse::new()
        .level(Level::INFO)
        .on_response(response, latency, span);
}
