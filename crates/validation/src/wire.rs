//! JSON bodies of the remote validator endpoint.
//!
//! Both the validator service (serializing) and the dispatcher's remote path
//! (deserializing) use these shapes, so the two sides cannot drift apart.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::code::ItemCode;
use crate::result::ValidationResult;
use crate::rules::RuleSet;

/// `POST /validate` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
}

/// `POST /validate` response body for business-rule outcomes (HTTP 200).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
    /// Normalized code, or `""` when none was supplied.
    pub code: String,
    pub timestamp: String,
    pub validator: String,
}

impl ValidateResponse {
    pub fn new(
        code: Option<&ItemCode>,
        result: ValidationResult,
        validator: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let (valid, message) = result.into_parts();
        Self {
            valid,
            message,
            code: code.map(|c| c.as_str().to_string()).unwrap_or_default(),
            timestamp: timestamp(now),
            validator: validator.into(),
        }
    }
}

/// Error body for HTTP 400/500 answers from the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailureBody {
    pub valid: bool,
    pub message: String,
    pub timestamp: String,
}

impl ValidationFailureBody {
    pub fn new(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            timestamp: timestamp(now),
        }
    }
}

/// Structural parameters of the active rule set (`GET /info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesInfo {
    pub code_length: usize,
    pub pattern: String,
    pub prohibited_prefixes: Vec<String>,
    pub prohibited_suffixes: Vec<String>,
}

impl From<&RuleSet> for RulesInfo {
    fn from(rules: &RuleSet) -> Self {
        Self {
            code_length: rules.code_length(),
            pattern: rules.pattern_description().to_string(),
            prohibited_prefixes: rules.prohibited_prefixes().to_vec(),
            prohibited_suffixes: rules.prohibited_suffixes().to_vec(),
        }
    }
}

/// `GET /info` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub description: String,
    pub validator: String,
    pub rules: RulesInfo,
    pub endpoints: BTreeMap<String, String>,
}

/// ISO-8601 UTC timestamp with microsecond precision.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}
