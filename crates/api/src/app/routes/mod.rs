use axum::{routing::get, Router};

pub mod inventory;
pub mod system;

/// Item CRUD routes.
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/api/inventory/:id",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
}
