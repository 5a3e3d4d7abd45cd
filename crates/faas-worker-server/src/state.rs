//! Application state holding the resolved handler.
//!
//! [`AppState`] is built once, before the listener starts, and shared by
//! cloning. The handler inside is an `Arc<dyn Handler>` that is only ever
//! read, so request tasks need no locking.

use std::sync::Arc;

use faas_worker_core::{HandlerRegistry, HandlerResolutionError, SharedHandler};

/// Outcome of startup handler resolution.
#[derive(Clone)]
enum HandlerSlot {
    /// A handler is available for requests.
    Loaded {
        identifier: String,
        handler: SharedHandler,
    },
    /// Resolution failed; every dispatch answers with an unavailable error.
    Unresolved { identifier: String, reason: String },
}

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    slot: Arc<HandlerSlot>,
}

impl AppState {
    /// Resolves `identifier` against `registry`.
    pub fn resolve(
        registry: &HandlerRegistry,
        identifier: &str,
    ) -> Result<Self, HandlerResolutionError> {
        let handler = registry.resolve(identifier)?;
        Ok(Self::with_handler(identifier, handler))
    }

    /// Creates a state serving `handler`.
    pub fn with_handler(identifier: impl Into<String>, handler: SharedHandler) -> Self {
        AppState {
            slot: Arc::new(HandlerSlot::Loaded {
                identifier: identifier.into(),
                handler,
            }),
        }
    }

    /// Creates a state with no handler.
    pub fn unresolved(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        AppState {
            slot: Arc::new(HandlerSlot::Unresolved {
                identifier: identifier.into(),
                reason: reason.into(),
            }),
        }
    }

    /// Creates an unresolved state from a failed resolution.
    pub fn from_resolution_error(err: &HandlerResolutionError) -> Self {
        Self::unresolved(err.identifier.clone(), err.to_string())
    }

    /// The handler, if one was resolved.
    pub fn handler(&self) -> Option<&SharedHandler> {
        match self.slot.as_ref() {
            HandlerSlot::Loaded { handler, .. } => Some(handler),
            HandlerSlot::Unresolved { .. } => None,
        }
    }

    /// The configured identifier, whether or not it resolved.
    pub fn identifier(&self) -> &str {
        match self.slot.as_ref() {
            HandlerSlot::Loaded { identifier, .. } | HandlerSlot::Unresolved { identifier, .. } => {
                identifier
            }
        }
    }

    /// Why resolution failed, for an unresolved state.
    pub fn unresolved_reason(&self) -> Option<&str> {
        match self.slot.as_ref() {
            HandlerSlot::Unresolved { reason, .. } => Some(reason),
            HandlerSlot::Loaded { .. } => None,
        }
    }
}
