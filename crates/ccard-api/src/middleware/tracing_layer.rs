//! # Request/Response Tracing
//!
//! Configures `tower_http::trace::TraceLayer` for structured request
//! logging with tracing spans.

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

type MakeSpanFn = fn(&Request<axum::body::Body>) -> Span;

/// Build a `TraceLayer` configured for the card API.
///
/// Each request gets an `http_request` span with method and path. The query
/// string is left out of the span and card numbers in the path are masked.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpanFn, (), DefaultOnResponse> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpanFn)
        .on_request(())
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

fn make_span(request: &Request<axum::body::Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %redact_path(request.uri().path()),
    )
}

/// Shortest all-digit path segment treated as a card number.
const MIN_REDACTED_DIGITS: usize = 12;

/// Replace every long all-digit segment with `****` and its last four digits.
fn redact_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.len() >= MIN_REDACTED_DIGITS
                && segment.bytes().all(|b| b.is_ascii_digit())
            {
                format!("****{}", &segment[segment.len() - 4..])
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
