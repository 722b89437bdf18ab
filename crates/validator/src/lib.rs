//! Remote ("legacy") item-code validator service.
//!
//! Runs the same rule engine the inventory API uses in mock mode, behind a
//! small HTTP surface: `POST /validate`, `GET /info`, `GET /health`.

pub mod app;
pub mod config;
