use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use meshinv_validation::wire::ValidationFailureBody;

/// `{"valid": false, "message": ..., "timestamp": ...}` with `status`.
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ValidationFailureBody::new(message, Utc::now()))).into_response()
}

/// Turns a handler panic into the service's 500 error body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown error".to_string()
    };

    tracing::error!(error = %detail, "validation error");
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Legacy validation service error: {detail}"),
    )
}
