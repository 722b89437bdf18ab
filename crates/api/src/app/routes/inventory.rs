use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use meshinv_inventory::{ItemChanges, ItemId, NewItem};

use crate::app::{dto, errors, AppServices};

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListQuery>,
) -> Response {
    let config = &services.config;
    let query = params.resolve(config.default_page_size, config.max_page_size);

    match services.store.list(&query) {
        Ok(page) => {
            tracing::info!(
                returned = page.items.len(),
                page = page.page,
                pages = page.pages,
                "listed inventory items"
            );
            Json(dto::ItemListResponse::from(page)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Create an item.
///
/// Input checks and the duplicate lookup run before the code is sent for
/// validation, so a rejected request never costs a validator round trip.
pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Response {
    let req = match dto::CreateItemRequest::parse(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let new = match NewItem::new(&req.code, &req.name, req.quantity) {
        Ok(n) => n,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.find_by_code(new.code()) {
        Ok(Some(existing)) => return errors::duplicate_code(&existing),
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    let verdict = services.validator.validate(new.code()).await;
    if !verdict.is_valid() {
        tracing::warn!(
            code = %new.code(),
            reason = %verdict.message(),
            "item code validation failed"
        );
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_item_code",
            format!("Invalid item code: {}", verdict.message()),
        );
    }

    match services.store.insert(new, Utc::now()) {
        Ok(item) => {
            tracing::info!(
                id = %item.id,
                code = %item.code,
                name = %item.name,
                quantity = item.quantity,
                "added inventory item"
            );
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<ItemId>() else {
        return errors::item_not_found();
    };

    match services.store.get(id) {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => errors::item_not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Update name and/or quantity. The code never changes.
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let Ok(id) = id.parse::<ItemId>() else {
        return errors::item_not_found();
    };

    match services.store.get(id) {
        Ok(Some(_)) => {}
        Ok(None) => return errors::item_not_found(),
        Err(e) => return errors::store_error_to_response(e),
    }

    let req = match dto::UpdateItemRequest::parse(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let changes = match ItemChanges::new(req.name.as_deref(), req.quantity) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.update(id, &changes, Utc::now()) {
        Ok(Some(item)) => {
            tracing::info!(id = %item.id, code = %item.code, "updated inventory item");
            Json(item).into_response()
        }
        // Deleted between the lookup and the write.
        Ok(None) => errors::item_not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<ItemId>() else {
        return errors::item_not_found();
    };

    match services.store.delete(id) {
        Ok(Some(item)) => {
            tracing::info!(id = %item.id, code = %item.code, "deleted inventory item");
            Json(json!({
                "message": format!("Item {} deleted successfully", item.code),
            }))
            .into_response()
        }
        Ok(None) => errors::item_not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}
