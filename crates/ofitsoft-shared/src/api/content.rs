use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of `GET /api/v1/content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSummary {
    pub domain: String,
    pub updated_at: DateTime<Utc>,
}

/// JSON error body returned by the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
