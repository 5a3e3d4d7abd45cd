pub mod error;
pub mod handler;
pub mod identifier;
pub mod registry;

// Re-export commonly used types
pub use error::{BoxError, HandlerError, HandlerResolutionError, RegistryError, ResolveCause};
pub use handler::{
    async_handler, invoke_guarded, sync_handler, AsyncFn, Handler, HandlerFuture, HandlerKind,
    SharedHandler, SyncFn,
};
pub use identifier::{HandlerPath, DEFAULT_HANDLER};
pub use registry::{HandlerRegistration, HandlerRegistry};
