//! The dispatcher: forwards a payload to the resolved handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use faas_worker_core::{invoke_guarded, HandlerError};

use crate::error::ApiError;
use crate::schema::invoke::{InvokeRequest, InvokeResponse};
use crate::state::AppState;

/// Runs the configured handler on the request's payload.
///
/// Availability is checked before the body, so an unresolved worker answers
/// 500 even to malformed requests. Body rejections map to 422, handler
/// errors and panics to 400.
///
/// `POST /`
pub async fn execute_handler(
    State(state): State<AppState>,
    body: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let Some(handler) = state.handler() else {
        tracing::error!(
            handler = state.identifier(),
            reason = state.unresolved_reason().unwrap_or_default(),
            "request received but no handler is loaded"
        );
        return Err(ApiError::HandlerUnavailable);
    };

    let Json(req) = body.map_err(|rejection| ApiError::ValidationFailed(rejection.body_text()))?;
    tracing::debug!(payload = %req.payload, "received request");

    match invoke_guarded(handler.as_ref(), req.payload).await {
        Ok(result) => {
            tracing::debug!(%result, "handler function executed successfully");
            Ok(Json(InvokeResponse { result }))
        }
        Err(err) => {
            let panicked = matches!(err, HandlerError::Panicked(_));
            let err = ApiError::from(err);
            tracing::error!(handler = state.identifier(), panicked, "{}", err);
            Err(err)
        }
    }
}
