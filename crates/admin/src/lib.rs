//! Menuboard Admin library.
//!
//! Back-office for the restaurant menu. This crate provides the admin as a
//! library so the router can be tested and reused.
//!
//! # Session model
//!
//! The admin has no server-side session store. Login exchanges credentials
//! with the authentication API for a bearer token, which is kept together with
//! the admin id and feature flags in three cookies (see [`session`]). Pages are
//! gated on the presence of the token and on individual feature flags (see
//! [`middleware::auth`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use axum::{Router, http::Uri, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Build the admin application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(
            middleware::breadcrumb::provide_breadcrumbs,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

async fn not_found(uri: Uri) -> error::AppError {
    error::AppError::NotFound(uri.path().to_string())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the authentication API.
async fn health() -> &'static str {
    "ok"
}
