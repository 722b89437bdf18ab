//! Inventory API application wiring (Axum router + shared services).
//!
//! - `routes/`: HTTP handlers (`inventory.rs` for item CRUD, `system.rs`
//!   for health checks and service info)
//! - `dto.rs`: request parsing and response shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use meshinv_infra::{DispatcherBuildError, InMemoryItemStore, ItemStore, ValidationDispatcher};
use meshinv_validation::RuleEngine;

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;

pub const SERVICE_NAME: &str = "inventory-backend";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a handler needs, shared across requests.
pub struct AppServices {
    pub store: Arc<dyn ItemStore>,
    pub validator: ValidationDispatcher,
    pub config: AppConfig,
}

/// Build the full HTTP router with an empty in-memory store.
///
/// Fails only when the remote validator client cannot be constructed.
pub fn build_app(config: AppConfig) -> Result<Router, DispatcherBuildError> {
    let validator = ValidationDispatcher::from_mode(&config.validation, RuleEngine::legacy())?;
    let mode = if validator.is_mock() { "mock" } else { "legacy" };
    tracing::info!(
        mode,
        target = %validator.describe(),
        "item code validation configured"
    );
    Ok(build_app_with(
        config,
        Arc::new(InMemoryItemStore::new()),
        validator,
    ))
}

/// Build the router around explicit collaborators.
pub fn build_app_with(
    config: AppConfig,
    store: Arc<dyn ItemStore>,
    validator: ValidationDispatcher,
) -> Router {
    let cors = build_cors_layer(&config.cors_origins);
    let services = Arc::new(AppServices {
        store,
        validator,
        config,
    });

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/ready", get(routes::system::ready))
        .route("/info", get(routes::system::info))
        .merge(routes::router())
        .fallback(errors::not_found)
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// `*` allows any origin; otherwise only the listed ones. Origins were
/// checked when the config was loaded.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(origins)
}
