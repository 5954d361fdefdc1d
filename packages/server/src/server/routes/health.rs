use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use tracing::error;

use crate::server::app::AppState;

/// Reported in place of the underlying store error, which stays in the logs.
pub const DATABASE_UNAVAILABLE: &str = "database unavailable";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint
///
/// Checks that the user store answers within its timeout.
///
/// Returns 200 OK if all systems are healthy, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let db_health = match state.auth_service.health_check().await {
        Ok(()) => DatabaseHealth {
            status: "ok".to_string(),
            error: None,
        },
        Err(e) => {
            error!(error = %e, "Health check failed");
            DatabaseHealth {
                status: "error".to_string(),
                error: Some(DATABASE_UNAVAILABLE.to_string()),
            }
        }
    };

    let is_healthy = db_health.status == "ok";

    let (status_code, overall_status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database: db_health,
        }),
    )
}
