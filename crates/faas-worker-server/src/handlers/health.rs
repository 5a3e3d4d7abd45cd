//! Liveness probe.

use axum::Json;
use chrono::Utc;

use crate::schema::health::HealthResponse;

/// Always answers 200, whatever the handler state.
///
/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
