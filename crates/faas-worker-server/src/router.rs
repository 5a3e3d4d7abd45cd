//! Router assembly for the worker HTTP API.
//!
//! [`build_router`] wires the dispatcher and the health probe with a
//! tracing middleware layer.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router.
///
/// TraceLayer provides request-level logging via tracing. Request bodies are
/// not size-limited; payloads of any length reach the handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::invoke::execute_handler))
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
