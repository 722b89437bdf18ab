//! Inventory backend HTTP API: item CRUD with item-code validation delegated
//! to the configured validator.

pub mod app;
pub mod config;
