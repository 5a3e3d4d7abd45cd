use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Time the probe was answered, serialized as RFC 3339 in UTC.
    pub timestamp: DateTime<Utc>,
}
