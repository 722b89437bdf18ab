use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::Value;

use meshinv_validation::wire::ValidateResponse;
use meshinv_validation::ItemCode;

use crate::app::{errors, ValidatorState};

pub const MSG_MISSING_CODE: &str = "Missing item code in request";
pub const MSG_CODE_NOT_STRING: &str = "Item code must be a string";

/// `POST /validate`.
///
/// Business-rule outcomes (valid or not) are always HTTP 200; only a body
/// without a usable `code` is a 400.
pub async fn validate(Extension(state): Extension<Arc<ValidatorState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable validation request body");
            return errors::failure(StatusCode::BAD_REQUEST, MSG_MISSING_CODE);
        }
    };

    let raw = match payload.get("code") {
        None => return errors::failure(StatusCode::BAD_REQUEST, MSG_MISSING_CODE),
        Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => return errors::failure(StatusCode::BAD_REQUEST, MSG_CODE_NOT_STRING),
    };

    let input = raw.unwrap_or_default();
    tracing::info!(code = %input, "validating item code");

    let result = state.engine.evaluate(input);
    let normalized = raw.map(ItemCode::normalize).filter(|c| !c.is_empty());

    let latency = state.config.simulated_latency;
    if result.is_valid() && !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    tracing::info!(
        code = %input,
        valid = result.is_valid(),
        message = %result.message(),
        "validation result"
    );

    Json(ValidateResponse::new(
        normalized.as_ref(),
        result,
        state.config.validator_id.clone(),
        Utc::now(),
    ))
    .into_response()
}
