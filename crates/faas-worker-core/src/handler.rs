//! The handler capability and its sync/async adapters.
//!
//! Every handler, whatever its calling convention, is driven through the
//! single [`Handler::invoke`] method. [`SyncFn`] adapts a plain function,
//! [`AsyncFn`] adapts a function returning a future. Callers hold handlers as
//! [`SharedHandler`] (`Arc<dyn Handler>`) and never need to know which
//! adapter is behind it.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;

use crate::error::HandlerError;

/// Boxed future returned by [`Handler::invoke`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, HandlerError>> + Send + 'a>>;

/// A handler shared across request tasks.
pub type SharedHandler = Arc<dyn Handler>;

/// Calling convention of the function behind a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    Sync,
    Async,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Sync => write!(f, "sync"),
            HandlerKind::Async => write!(f, "async"),
        }
    }
}

/// A unary function from a string payload to a JSON value.
pub trait Handler: Send + Sync + 'static {
    /// Processes one payload.
    fn invoke(&self, payload: String) -> HandlerFuture<'_>;

    /// Whether the underlying function is synchronous or asynchronous.
    fn kind(&self) -> HandlerKind;
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("kind", &self.kind()).finish()
    }
}

/// Adapter for synchronous handler functions.
///
/// The function runs when the returned future is first polled, not when
/// `invoke` is called.
pub struct SyncFn<F> {
    func: F,
}

impl<F> SyncFn<F> {
    pub fn new(func: F) -> Self {
        SyncFn { func }
    }
}

impl<F, T> Handler for SyncFn<F>
where
    F: Fn(&str) -> Result<T, HandlerError> + Send + Sync + 'static,
    T: Serialize,
{
    fn invoke(&self, payload: String) -> HandlerFuture<'_> {
        Box::pin(async move {
            let output = (self.func)(&payload)?;
            serde_json::to_value(output).map_err(HandlerError::Serialization)
        })
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Sync
    }
}

/// Adapter for asynchronous handler functions.
pub struct AsyncFn<F> {
    func: F,
}

impl<F> AsyncFn<F> {
    pub fn new(func: F) -> Self {
        AsyncFn { func }
    }
}

impl<F, Fut, T> Handler for AsyncFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, HandlerError>> + Send,
    T: Serialize,
{
    fn invoke(&self, payload: String) -> HandlerFuture<'_> {
        Box::pin(async move {
            let output = (self.func)(payload).await?;
            serde_json::to_value(output).map_err(HandlerError::Serialization)
        })
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Async
    }
}

/// Wraps a synchronous function as a [`SharedHandler`].
pub fn sync_handler<F, T>(func: F) -> SharedHandler
where
    F: Fn(&str) -> Result<T, HandlerError> + Send + Sync + 'static,
    T: Serialize,
{
    Arc::new(SyncFn::new(func))
}

/// Wraps an asynchronous function as a [`SharedHandler`].
pub fn async_handler<F, Fut, T>(func: F) -> SharedHandler
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, HandlerError>> + Send,
    T: Serialize,
{
    Arc::new(AsyncFn::new(func))
}

/// Invokes `handler`, turning panics into [`HandlerError::Panicked`].
///
/// Panics are caught both while building the future and while polling it,
/// so a misbehaving handler never unwinds into the caller's task.
pub async fn invoke_guarded(handler: &dyn Handler, payload: String) -> Result<Value, HandlerError> {
    let future = match panic::catch_unwind(AssertUnwindSafe(|| handler.invoke(payload))) {
        Ok(future) => future,
        Err(panic) => return Err(HandlerError::Panicked(panic_message(panic))),
    };

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => Err(HandlerError::Panicked(panic_message(panic))),
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
