//! Health check endpoint
//!
//! A fixed-body liveness probe for uptime monitoring. Deliberately touches
//! nothing — no database round-trip — so it reports process health only.
//!
//! # Endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! Response:
//! ```json
//! { "status": "ok" }
//! ```

use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_body() {
        let Json(body) = health_check().await;
        assert_eq!(body.status, "ok");
    }
}
