//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for the worker's endpoints. It
//! implements `axum::response::IntoResponse` to produce structured JSON error
//! responses with appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faas_worker_core::HandlerError;
use serde::Serialize;

/// Message returned when no handler was resolved at startup.
pub const HANDLER_UNAVAILABLE_MESSAGE: &str =
    "Handler function not loaded. Check server logs for configuration errors.";

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body did not match `{"payload": string}` (422).
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// The handler returned an error or panicked (400).
    #[error("Error executing handler function: {0}")]
    HandlerExecution(#[from] HandlerError),

    /// No handler was resolved at startup (500).
    #[error("{}", HANDLER_UNAVAILABLE_MESSAGE)]
    HandlerUnavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::HandlerExecution(_) => StatusCode::BAD_REQUEST,
            ApiError::HandlerUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApiError::HandlerExecution(_) => "HANDLER_EXECUTION_FAILED",
            ApiError::HandlerUnavailable => "HANDLER_UNAVAILABLE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::ValidationFailed(msg) => msg.clone(),
            other => other.to_string(),
        };
        let detail = ApiErrorDetail {
            code: self.code().to_string(),
            message,
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (self.status(), axum::Json(body)).into_response()
    }
}
