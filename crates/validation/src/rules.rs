//! Immutable rule configuration for item-code validation.
//!
//! A [`RuleSet`] is built once at process start and never mutated. Cloning is
//! cheap enough to hand one to every component that needs it, and a
//! [`RuleEngine`](crate::RuleEngine) wraps it in an `Arc` for sharing across
//! concurrent requests.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use meshinv_core::ValueObject;

/// Exact length a code must have under the legacy rules.
pub const LEGACY_CODE_LENGTH: usize = 6;

/// One letter followed by five uppercase alphanumerics.
pub const LEGACY_PATTERN: &str = r"^[A-Z][A-Z0-9]{5}$";

pub const LEGACY_PATTERN_DESCRIPTION: &str = "Letter followed by 5 alphanumeric characters";

pub const LEGACY_PROHIBITED_PREFIXES: [&str; 6] = ["XX", "ZZ", "TEST", "TEMP", "DEMO", "SYS"];

pub const LEGACY_PROHIBITED_SUFFIXES: [&str; 4] = ["000", "999", "DEL", "BAD"];

pub const LEGACY_RESERVED_CODES: [(&str, &str); 3] = [
    ("LEGACY", "Reserved for legacy system migration"),
    ("SYSTEM", "Reserved for system use"),
    ("ADMINS", "Reserved for administrative functions"),
];

/// Legacy checksum constants. Reproduced exactly; there is no business
/// meaning behind them beyond compatibility with the old system.
pub const LEGACY_CHECKSUM_MODULUS: u32 = 97;
pub const LEGACY_CHECKSUM_THRESHOLD: u32 = 10;

static LEGACY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LEGACY_PATTERN).expect("legacy code pattern is a valid regex"));

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("invalid code pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("code length must be greater than zero")]
    ZeroLength,

    #[error("checksum modulus must be greater than zero")]
    ZeroModulus,
}

/// Checksum gate: `sum(code points) % modulus` must be at least `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumRule {
    pub modulus: u32,
    pub threshold: u32,
}

impl ChecksumRule {
    pub fn legacy() -> Self {
        Self {
            modulus: LEGACY_CHECKSUM_MODULUS,
            threshold: LEGACY_CHECKSUM_THRESHOLD,
        }
    }
}

/// Prefix/suffix/pattern/reserved-code/checksum constraints for item codes.
///
/// Prefixes and suffixes are kept in insertion order: when several would
/// match, the first one listed is the one reported.
#[derive(Debug, Clone)]
pub struct RuleSet {
    code_length: usize,
    pattern: Regex,
    pattern_description: String,
    prohibited_prefixes: Vec<String>,
    prohibited_suffixes: Vec<String>,
    reserved_codes: BTreeMap<String, String>,
    checksum: ChecksumRule,
}

impl RuleSet {
    /// The rules enforced by the legacy validation system.
    pub fn legacy() -> Self {
        Self {
            code_length: LEGACY_CODE_LENGTH,
            pattern: LEGACY_REGEX.clone(),
            pattern_description: LEGACY_PATTERN_DESCRIPTION.to_string(),
            prohibited_prefixes: to_owned_list(&LEGACY_PROHIBITED_PREFIXES),
            prohibited_suffixes: to_owned_list(&LEGACY_PROHIBITED_SUFFIXES),
            reserved_codes: LEGACY_RESERVED_CODES
                .iter()
                .map(|(code, reason)| (code.to_string(), reason.to_string()))
                .collect(),
            checksum: ChecksumRule::legacy(),
        }
    }

    /// An otherwise empty rule set with a custom structure.
    ///
    /// Starts with no prohibited prefixes/suffixes, no reserved codes and the
    /// legacy checksum gate.
    pub fn new(
        code_length: usize,
        pattern: &str,
        pattern_description: impl Into<String>,
    ) -> Result<Self, RuleSetError> {
        if code_length == 0 {
            return Err(RuleSetError::ZeroLength);
        }
        let pattern = compile(pattern)?;

        Ok(Self {
            code_length,
            pattern,
            pattern_description: pattern_description.into(),
            prohibited_prefixes: Vec::new(),
            prohibited_suffixes: Vec::new(),
            reserved_codes: BTreeMap::new(),
            checksum: ChecksumRule::legacy(),
        })
    }

    /// Replace the structural pattern, keeping every other rule.
    pub fn with_pattern(
        mut self,
        pattern: &str,
        pattern_description: impl Into<String>,
    ) -> Result<Self, RuleSetError> {
        self.pattern = compile(pattern)?;
        self.pattern_description = pattern_description.into();
        Ok(self)
    }

    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prohibited_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prohibited_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reserved<I, K, V>(mut self, reserved: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.reserved_codes = reserved
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_checksum(mut self, checksum: ChecksumRule) -> Result<Self, RuleSetError> {
        if checksum.modulus == 0 {
            return Err(RuleSetError::ZeroModulus);
        }
        self.checksum = checksum;
        Ok(self)
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn pattern_description(&self) -> &str {
        &self.pattern_description
    }

    pub fn prohibited_prefixes(&self) -> &[String] {
        &self.prohibited_prefixes
    }

    pub fn prohibited_suffixes(&self) -> &[String] {
        &self.prohibited_suffixes
    }

    pub fn reserved_reason(&self, code: &str) -> Option<&str> {
        self.reserved_codes.get(code).map(String::as_str)
    }

    pub fn checksum(&self) -> ChecksumRule {
        self.checksum
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::legacy()
    }
}

// `Regex` has no `PartialEq`; two rule sets are equal when their source
// patterns are.
impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.code_length == other.code_length
            && self.pattern.as_str() == other.pattern.as_str()
            && self.pattern_description == other.pattern_description
            && self.prohibited_prefixes == other.prohibited_prefixes
            && self.prohibited_suffixes == other.prohibited_suffixes
            && self.reserved_codes == other.reserved_codes
            && self.checksum == other.checksum
    }
}

impl ValueObject for RuleSet {}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn compile(pattern: &str) -> Result<Regex, RuleSetError> {
    Regex::new(pattern).map_err(|source| RuleSetError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_rules_keep_listed_order() {
        let rules = RuleSet::legacy();
        assert_eq!(rules.code_length(), 6);
        assert_eq!(
            rules.prohibited_prefixes(),
            ["XX", "ZZ", "TEST", "TEMP", "DEMO", "SYS"]
        );
        assert_eq!(rules.prohibited_suffixes(), ["000", "999", "DEL", "BAD"]);
        assert_eq!(rules.reserved_reason("SYSTEM"), Some("Reserved for system use"));
        assert_eq!(rules.reserved_reason("AB12CD"), None);
        assert_eq!(rules.checksum(), ChecksumRule { modulus: 97, threshold: 10 });
    }

    #[test]
    fn new_rejects_bad_pattern_and_zero_length() {
        let err = RuleSet::new(6, "^[A-Z(", "broken").unwrap_err();
        assert!(matches!(err, RuleSetError::Pattern { .. }));

        let err = RuleSet::new(0, "^$", "empty").unwrap_err();
        assert!(matches!(err, RuleSetError::ZeroLength));
    }

    #[test]
    fn with_pattern_keeps_other_rules() {
        let rules = RuleSet::legacy()
            .with_pattern(r"^[A-Z]{6}$", "Six letters")
            .unwrap();
        assert_eq!(rules.pattern_description(), "Six letters");
        assert!(!rules.pattern().is_match("AB12CD"));
        assert_eq!(rules.prohibited_prefixes().len(), 6);

        let err = RuleSet::legacy().with_pattern("(", "broken").unwrap_err();
        assert!(matches!(err, RuleSetError::Pattern { .. }));
    }

    #[test]
    fn with_checksum_rejects_zero_modulus() {
        let err = RuleSet::legacy()
            .with_checksum(ChecksumRule { modulus: 0, threshold: 0 })
            .unwrap_err();
        assert!(matches!(err, RuleSetError::ZeroModulus));
    }

    #[test]
    fn equality_compares_pattern_source() {
        assert_eq!(RuleSet::legacy(), RuleSet::legacy());
        assert_ne!(RuleSet::legacy(), RuleSet::legacy().with_prefixes(["QQ"]));
    }
}
