//! Dispatch request/response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /`.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeRequest {
    /// Raw input, interpreted entirely by the handler.
    pub payload: String,
}

/// Successful dispatch response.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeResponse {
    /// Whatever the handler returned.
    pub result: serde_json::Value,
}
