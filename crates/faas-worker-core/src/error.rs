//! Error types for handler resolution and invocation.
//!
//! Uses `thiserror` for structured, matchable variants. Resolution failures
//! all fold into [`HandlerResolutionError`], which keeps the identifier that
//! was asked for alongside the [`ResolveCause`].

use thiserror::Error;

/// Boxed error type accepted from handler code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while a handler processes a payload.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler rejected the payload with a plain message.
    #[error("{0}")]
    Message(String),

    /// The handler failed with an underlying error.
    #[error(transparent)]
    Source(BoxError),

    /// The handler returned a value that could not be turned into JSON.
    #[error("handler result is not JSON-serializable: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The handler panicked while running.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Builds a [`HandlerError::Message`] from anything printable.
    pub fn msg(message: impl Into<String>) -> Self {
        HandlerError::Message(message.into())
    }

    /// Wraps an arbitrary error as [`HandlerError::Source`].
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HandlerError::Source(Box::new(err))
    }
}

/// Why a handler identifier could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveCause {
    /// The identifier has no `.` separator or an empty module/symbol part.
    #[error("identifier must have the form '<module.path>.<symbol>'")]
    Malformed,

    /// No handler module is registered under the module path.
    #[error("no module named '{module}'")]
    ModuleNotFound { module: String },

    /// The module exists but does not export the symbol.
    #[error("module '{module}' has no handler '{symbol}'")]
    SymbolNotFound { module: String, symbol: String },
}

/// A handler identifier failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load handler function from '{identifier}': {cause}")]
pub struct HandlerResolutionError {
    /// The identifier as it was supplied.
    pub identifier: String,
    /// The underlying reason.
    #[source]
    pub cause: ResolveCause,
}

impl HandlerResolutionError {
    pub fn new(identifier: impl Into<String>, cause: ResolveCause) -> Self {
        HandlerResolutionError {
            identifier: identifier.into(),
            cause,
        }
    }
}

/// Errors produced while populating a [`HandlerRegistry`](crate::HandlerRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Attempting to register an identifier that already exists.
    #[error("duplicate handler identifier: '{identifier}'")]
    Duplicate { identifier: String },

    /// The identifier cannot be split into a module path and a symbol.
    #[error("malformed handler identifier: '{identifier}'")]
    Malformed { identifier: String },
}
