//! Item-code validation domain.
//!
//! This crate holds the legacy business rules for inventory item codes,
//! implemented as deterministic domain logic (no IO, no HTTP, no clocks
//! except where a caller passes one in for wire timestamps).
//!
//! - `code.rs`: the normalized [`ItemCode`] value
//! - `rules.rs`: the immutable [`RuleSet`] and its legacy defaults
//! - `engine.rs`: the ordered checks ([`RuleEngine::evaluate`])
//! - `result.rs`: the single [`ValidationResult`] outcome type
//! - `wire.rs`: JSON bodies exchanged with a remote validator

pub mod code;
pub mod engine;
pub mod result;
pub mod rules;
pub mod wire;

pub use code::ItemCode;
pub use engine::{Rejection, RuleEngine};
pub use result::ValidationResult;
pub use rules::{ChecksumRule, RuleSet, RuleSetError};
