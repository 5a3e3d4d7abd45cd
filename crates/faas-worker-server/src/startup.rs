//! Startup sequence run before the listener is bound.

use axum::Router;
use faas_worker_core::{HandlerRegistry, HandlerResolutionError};

use crate::config::WorkerConfig;
use crate::router::build_router;
use crate::state::AppState;

/// Resolves the configured handler and builds the router serving it.
///
/// A resolution failure is returned to the caller, which must not bind a
/// listener; the worker never serves traffic without a handler.
pub fn prepare(
    config: &WorkerConfig,
    registry: &HandlerRegistry,
) -> Result<Router, HandlerResolutionError> {
    let state = AppState::resolve(registry, &config.handler_function)?;
    if let Some(handler) = state.handler() {
        tracing::info!(
            kind = %handler.kind(),
            "Successfully loaded handler function: '{}'",
            config.handler_function
        );
    }
    Ok(build_router(state))
}
