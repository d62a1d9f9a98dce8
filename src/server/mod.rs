use axum::Router;
use axum::extract::MatchedPath;
use axum::http::{Extensions, Request, Response, StatusCode};
use axum::routing::get;
use metrics::counter;
use std::any::Any;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::logs::TOTAL_REQUESTS;
use crate::server::error::{handle_health_panic, handle_text_panic};
use crate::utils::{format_duration, generate_request_id};

pub mod error;
pub mod http;
pub mod start;

pub use http::AppState;
pub use start::{ServerConfig, start_server};

/// Converts a captured handler panic into a response
type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> axum::response::Response;

/// Panic capture for routes answering in plain text
fn catch_text_panics() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_text_panic as PanicHandler)
}

/// Panic capture for the JSON health route
fn catch_health_panics() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_health_panic as PanicHandler)
}

/// Route template a request was matched against, if any
fn route_label(extensions: &Extensions) -> &str {
    extensions
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("unmatched")
}

/// Classify a response status for request logging
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "failed"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "served"
    }
}

/// Create the application router with request tracing
pub fn create_router(state: AppState) -> Router {
    // Every request gets its own span tagged with the matched route
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                request_id = %generate_request_id(),
                method = %request.method(),
                route = route_label(request.extensions()),
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            counter!(TOTAL_REQUESTS).increment(1);
            debug!(uri = %request.uri(), "HTTP request started");
        })
        .on_response(
            |response: &Response<_>, latency: Duration, _span: &tracing::Span| {
                let status = response.status();
                let kind = outcome(status);
                let latency = format_duration(latency);
                // Handler failures were already logged at error level
                if kind == "served" {
                    info!(%status, %latency, outcome = kind, "HTTP request finished");
                } else {
                    warn!(%status, %latency, outcome = kind, "HTTP request finished");
                }
            },
        );
    // Register the routes, each guarded against handler panics
    Router::new()
        .route("/", get(http::home).layer(catch_text_panics()))
        .route("/health", get(http::health).layer(catch_health_panics()))
        .layer(trace_layer)
        .with_state(state)
}
