use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use meshinv_validation::wire;

use crate::app::{AppServices, SERVICE_NAME, SERVICE_VERSION};

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": wire::timestamp(Utc::now()),
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
    }))
}

/// Ready once the item store answers.
pub async fn ready(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.store.ping() {
        Ok(()) => Json(json!({
            "status": "ready",
            "store": "available",
            "timestamp": wire::timestamp(Utc::now()),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not ready",
                    "store": "unavailable",
                    "error": e.to_string(),
                    "timestamp": wire::timestamp(Utc::now()),
                })),
            )
                .into_response()
        }
    }
}

pub async fn info(Extension(services): Extension<Arc<AppServices>>) -> Json<serde_json::Value> {
    let mock = services.validator.is_mock();
    Json(json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "description": "Inventory backend with legacy item code validation",
        "environment": services.config.environment.as_str(),
        "features": {
            "legacy_integration": !mock,
            "mock_validation": mock,
        },
        "configuration": {
            "legacy_service_url": services.validator.describe(),
            "cors_enabled": services.config.cors_enabled(),
        },
    }))
}
