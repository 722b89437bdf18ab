//! Validator HTTP application wiring (Axum router + shared state).
//!
//! - `routes/`: handlers (`validate.rs` for the rule endpoint, `system.rs`
//!   for health/info)
//! - `errors.rs`: error bodies and panic recovery

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use meshinv_validation::RuleEngine;

use crate::config::ValidatorConfig;

pub mod errors;
pub mod routes;

pub const SERVICE_NAME: &str = "legacy-validator";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared, read-only state for every request.
#[derive(Debug)]
pub struct ValidatorState {
    pub engine: RuleEngine,
    pub config: ValidatorConfig,
}

/// Build the validator router with the legacy rule set.
pub fn build_app(config: ValidatorConfig) -> Router {
    build_app_with_engine(config, RuleEngine::legacy())
}

/// Build the validator router around a specific engine.
pub fn build_app_with_engine(config: ValidatorConfig, engine: RuleEngine) -> Router {
    let state = Arc::new(ValidatorState { engine, config });

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/info", get(routes::system::info))
        .route("/validate", post(routes::validate::validate))
        .layer(Extension(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(errors::panic_response)),
        )
}
