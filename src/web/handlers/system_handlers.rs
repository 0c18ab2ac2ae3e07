// src/web/handlers/system_handlers.rs
use crate::database::DatabaseConfig;
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub const SERVICE_NAME: &str = "Landed Job Api";

pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn health_handler(
    db_config: &State<DatabaseConfig>,
) -> Result<Json<HealthResponse>, ApiError> {
    match db_config.health_check().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
        })),
        Err(e) => {
            error!("Health check failed: {:#}", e);
            Err(ApiError::Unavailable("Database unavailable".to_string()))
        }
    }
}
