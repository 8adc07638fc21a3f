//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
}

/// Database health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl HealthResponse {
    fn new(connected: bool, latency_ms: u64) -> Self {
        Self {
            status: if connected { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: DatabaseHealth {
                connected,
                latency_ms: connected.then_some(latency_ms),
            },
        }
    }
}

/// GET /api/health
///
/// 200 with details when the database answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let start = std::time::Instant::now();
    let connected = persistence::db::ping(&state.pool).await.is_ok();
    let latency_ms = start.elapsed().as_millis() as u64;

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse::new(connected, latency_ms)))
}

/// GET /api/health/live
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// GET /api/health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    match persistence::db::ping(&state.pool).await {
        Ok(()) => Ok(Json(StatusResponse {
            status: "ready".to_string(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            Err(ApiError::ServiceUnavailable(
                "Database is not reachable".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_healthy() {
        let json = serde_json::to_value(HealthResponse::new(true, 4)).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"]["connected"], true);
        assert_eq!(json["database"]["latency_ms"], 4);
    }

    #[test]
    fn test_health_response_unhealthy_hides_latency() {
        let json = serde_json::to_value(HealthResponse::new(false, 4)).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert!(json["database"]["latency_ms"].is_null());
    }

    #[tokio::test]
    async fn test_live() {
        let Json(response) = live().await;
        assert_eq!(response.status, "alive");
    }
}
