//! Default handler: JSON-decode the payload, or echo it back.

use faas_worker_core::{
    async_handler, sync_handler, HandlerError, HandlerRegistration, SharedHandler,
};
use serde::Serialize;
use serde_json::Value;

const HANDLER_NAME: &str = "default";

/// Result of the default handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Processed {
    /// The payload was valid JSON.
    ProcessedAsJson {
        handler: &'static str,
        processed_data: Value,
    },
    /// The payload was not JSON and is returned unchanged.
    ProcessedAsString {
        handler: &'static str,
        original_data: String,
    },
}

/// Decodes `payload` as JSON when possible, otherwise echoes it.
pub fn handle(payload: &str) -> Result<Processed, HandlerError> {
    tracing::debug!(len = payload.len(), "default handler received payload");
    Ok(match serde_json::from_str::<Value>(payload) {
        Ok(processed_data) => Processed::ProcessedAsJson {
            handler: HANDLER_NAME,
            processed_data,
        },
        Err(_) => Processed::ProcessedAsString {
            handler: HANDLER_NAME,
            original_data: payload.to_string(),
        },
    })
}

/// Same as [`handle`], with decoding moved onto the blocking pool so large
/// payloads do not stall the request executor.
pub async fn handle_async(payload: String) -> Result<Processed, HandlerError> {
    tokio::task::spawn_blocking(move || handle(&payload))
        .await
        .map_err(HandlerError::from_source)?
}

fn register_handle() -> SharedHandler {
    sync_handler(handle)
}

fn register_handle_async() -> SharedHandler {
    async_handler(handle_async)
}

inventory::submit! {
    HandlerRegistration::new("function.handler.handle", register_handle)
}

inventory::submit! {
    HandlerRegistration::new("function.handler.handle_async", register_handle_async)
}
