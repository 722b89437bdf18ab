use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use meshinv_core::DomainError;
use meshinv_infra::StoreError;
use meshinv_inventory::InventoryItem;

/// `{"error": <message>, "code": <machine code>}`.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> Response {
    match err {
        StoreError::DuplicateCode { existing, .. } => duplicate_code(&existing),
        StoreError::Unavailable => {
            tracing::error!("item store unavailable");
            json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                "Item store unavailable",
            )
        }
    }
}

/// 409 carrying the item that already owns the code.
pub fn duplicate_code(existing: &InventoryItem) -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({
            "error": format!("Item with code {} already exists", existing.code),
            "code": "duplicate_code",
            "existing_item": existing,
        })),
    )
        .into_response()
}

pub fn item_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "Item not found")
}

/// Router fallback.
pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "Not found")
}
