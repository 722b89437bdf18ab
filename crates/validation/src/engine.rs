//! Ordered evaluation of an item code against a [`RuleSet`].
//!
//! ## Check order
//!
//! ```text
//! raw input
//!   ↓
//! 1. empty after trimming?          → Empty
//!   ↓
//! 2. normalize (trim + uppercase)
//!   ↓
//! 3. length                         → Length
//! 4. structural pattern             → Pattern
//! 5. prohibited prefix (list order) → Prefix
//! 6. prohibited suffix (list order) → Suffix
//! 7. reserved code                  → Reserved
//! 8. checksum gate                  → Checksum
//!   ↓
//! Valid
//! ```
//!
//! The first failing check wins. The order is part of the contract: it
//! decides which message a caller sees when several rules would fail.

use std::sync::Arc;

use thiserror::Error;

use crate::code::ItemCode;
use crate::result::ValidationResult;
use crate::rules::RuleSet;

/// Why a code was rejected. `Display` yields the exact wire message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Item code cannot be empty")]
    Empty,

    #[error("Item code must be exactly {expected} characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Item code must start with letter and contain only alphanumeric characters")]
    Pattern,

    #[error("Item code cannot start with prohibited prefix: {0}")]
    Prefix(String),

    #[error("Item code cannot end with prohibited suffix: {0}")]
    Suffix(String),

    #[error("Item code is reserved: {0}")]
    Reserved(String),

    #[error("Item code failed legacy checksum validation")]
    Checksum,
}

/// Pure, stateless evaluator. Cheap to clone; the rule set is shared.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Arc<RuleSet>,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    pub fn legacy() -> Self {
        Self::new(RuleSet::legacy())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate a raw, untrusted code string.
    ///
    /// Never fails: malformed input maps to [`ValidationResult::Invalid`].
    pub fn evaluate(&self, raw: &str) -> ValidationResult {
        match self.inspect(raw) {
            Ok(code) => ValidationResult::valid(format!(
                "Item code {code} validated successfully by legacy system"
            )),
            Err(rejection) => ValidationResult::invalid(rejection.to_string()),
        }
    }

    /// Like [`evaluate`](Self::evaluate) but keeps the typed rejection and
    /// returns the normalized code on success.
    pub fn inspect(&self, raw: &str) -> Result<ItemCode, Rejection> {
        let code = ItemCode::normalize(raw);
        if code.is_empty() {
            return Err(Rejection::Empty);
        }
        self.check(&code)?;
        Ok(code)
    }

    /// Steps 3..=8 against an already normalized code.
    pub fn check(&self, code: &ItemCode) -> Result<(), Rejection> {
        let rules = &*self.rules;
        let value = code.as_str();

        let actual = code.char_len();
        if actual != rules.code_length() {
            return Err(Rejection::Length {
                expected: rules.code_length(),
                actual,
            });
        }

        if !rules.pattern().is_match(value) {
            return Err(Rejection::Pattern);
        }

        if let Some(prefix) = rules
            .prohibited_prefixes()
            .iter()
            .find(|p| value.starts_with(p.as_str()))
        {
            return Err(Rejection::Prefix(prefix.clone()));
        }

        if let Some(suffix) = rules
            .prohibited_suffixes()
            .iter()
            .find(|s| value.ends_with(s.as_str()))
        {
            return Err(Rejection::Suffix(suffix.clone()));
        }

        if let Some(reason) = rules.reserved_reason(value) {
            return Err(Rejection::Reserved(reason.to_string()));
        }

        let checksum = rules.checksum();
        if code.checksum(checksum.modulus) < checksum.threshold {
            return Err(Rejection::Checksum);
        }

        Ok(())
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::legacy()
    }
}
