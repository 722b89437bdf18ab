use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::Extension, Json};
use chrono::Utc;

use meshinv_validation::wire::{self, RulesInfo, ServiceInfo};

use crate::app::{ValidatorState, SERVICE_NAME, SERVICE_VERSION};

/// Liveness only; there are no dependencies to check.
pub async fn health(Extension(state): Extension<Arc<ValidatorState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "validator": state.config.validator_id,
        "timestamp": wire::timestamp(Utc::now()),
        "version": SERVICE_VERSION,
    }))
}

pub async fn info(Extension(state): Extension<Arc<ValidatorState>>) -> Json<ServiceInfo> {
    let endpoints: BTreeMap<String, String> = [
        ("/health", "Health check"),
        ("/validate", "POST - Validate item code"),
        ("/info", "Service information"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        description: "Legacy item code validation service".to_string(),
        validator: state.config.validator_id.clone(),
        rules: RulesInfo::from(state.engine.rules()),
        endpoints,
    })
}
