//! API Module
//!
//! HTTP API layer for the relay.
//! Each submodule handles endpoints for one proxied operation.

pub mod deploy;
pub mod error;
pub mod health;
pub mod retrieve;
pub mod status;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metarelay_client::RelayStream;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::Config;
use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Proxy endpoints
        .route("/api/proxy/retrieve", post(retrieve::retrieve_metadata))
        .route("/api/proxy/deploy", post(deploy::deploy_metadata))
        .route("/api/proxy/status/{job_id}", get(status::check_deploy_status))
        // Frontend
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        // Add state and middleware
        .layer(DefaultBodyLimit::max(config.max_body_bytes()))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span));

    if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Span for one inbound request
///
/// Records the path only. Status checks carry the caller's session id in
/// the query string, which must stay out of the logs.
fn request_span(request: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

/// Turn a relay stream into a streaming XML response
///
/// The upstream status is kept; the body is forwarded chunk by chunk. If
/// the caller disconnects, the body is dropped and the upstream connection
/// goes with it.
pub(crate) fn relay_response(stream: RelayStream) -> Response {
    let status = StatusCode::from_u16(stream.status()).unwrap_or(StatusCode::BAD_GATEWAY);

    (
        status,
        [(header::CONTENT_TYPE, "text/xml")],
        Body::from_stream(stream),
    )
        .into_response()
}
