//! Configuration loading and representation.
//!
//! Services read their settings once at startup. Values come through a
//! lookup function rather than straight from `std::env`, so tests can feed a
//! plain map and never touch the process environment.
//!
//! | Env Var                  | Default                      |
//! |--------------------------|------------------------------|
//! | `USE_MOCK_VALIDATION`    | `false`                      |
//! | `LEGACY_SERVICE_URL`     | `http://legacy-service:8080` |
//! | `LEGACY_SERVICE_TIMEOUT` | `10` (seconds)               |

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::validation_dispatcher::{check_base_url, ValidationMode, DEFAULT_REMOTE_TIMEOUT};

pub const DEFAULT_LEGACY_SERVICE_URL: &str = "http://legacy-service:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &str, value: &str, reason: impl Display) -> Self {
        Self::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Typed access to key/value settings.
pub struct Settings<F> {
    lookup: F,
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Settings<fn(&str) -> Option<String>> {
    /// Settings backed by the process environment.
    pub fn from_env() -> Self {
        Self::new(process_env)
    }
}

impl<F> Settings<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Trimmed value; blank counts as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Case-insensitive `true`; anything else (or unset) is `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(key, &raw, e)),
            None => Ok(default),
        }
    }

    /// Comma-separated list; empty entries dropped.
    pub fn list_or(&self, key: &str, default: &str) -> Vec<String> {
        self.string_or(key, default)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Where item codes are validated. `force_mock` wins over the
    /// environment (used by the testing profile).
    pub fn validation_mode(&self, force_mock: bool) -> Result<ValidationMode, ConfigError> {
        if force_mock || self.flag("USE_MOCK_VALIDATION") {
            return Ok(ValidationMode::Mock);
        }

        let base_url = self.string_or("LEGACY_SERVICE_URL", DEFAULT_LEGACY_SERVICE_URL);
        check_base_url(&base_url)
            .map_err(|e| ConfigError::invalid("LEGACY_SERVICE_URL", &base_url, e))?;
        let timeout_secs: u64 =
            self.parse_or("LEGACY_SERVICE_TIMEOUT", DEFAULT_REMOTE_TIMEOUT.as_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "LEGACY_SERVICE_TIMEOUT",
                "0",
                "must be greater than zero",
            ));
        }

        Ok(ValidationMode::Legacy {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings<impl Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::new(move |key: &str| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_legacy_mode() {
        let mode = settings(&[]).validation_mode(false).unwrap();
        assert_eq!(
            mode,
            ValidationMode::Legacy {
                base_url: "http://legacy-service:8080".to_string(),
                timeout: Duration::from_secs(10),
            }
        );
    }

    #[test]
    fn mock_flag_is_case_insensitive() {
        let mode = settings(&[("USE_MOCK_VALIDATION", "TRUE")])
            .validation_mode(false)
            .unwrap();
        assert_eq!(mode, ValidationMode::Mock);

        let mode = settings(&[("USE_MOCK_VALIDATION", "yes")])
            .validation_mode(false)
            .unwrap();
        assert!(matches!(mode, ValidationMode::Legacy { .. }));
    }

    #[test]
    fn force_mock_overrides_environment() {
        let mode = settings(&[("USE_MOCK_VALIDATION", "false")])
            .validation_mode(true)
            .unwrap();
        assert_eq!(mode, ValidationMode::Mock);
    }

    #[test]
    fn custom_url_and_timeout() {
        let mode = settings(&[
            ("LEGACY_SERVICE_URL", "http://10.0.0.5:9000"),
            ("LEGACY_SERVICE_TIMEOUT", " 3 "),
        ])
        .validation_mode(false)
        .unwrap();
        assert_eq!(
            mode,
            ValidationMode::Legacy {
                base_url: "http://10.0.0.5:9000".to_string(),
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = settings(&[("LEGACY_SERVICE_TIMEOUT", "soon")])
            .validation_mode(false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "LEGACY_SERVICE_TIMEOUT"));

        let err = settings(&[("LEGACY_SERVICE_TIMEOUT", "0")])
            .validation_mode(false)
            .unwrap_err();
        assert!(err.to_string().contains("must be greater than zero"));
    }

    #[test]
    fn malformed_service_url_is_rejected_at_load() {
        let err = settings(&[("LEGACY_SERVICE_URL", "not a url")])
            .validation_mode(false)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "LEGACY_SERVICE_URL"));

        // Mock mode never looks at the URL.
        let mode = settings(&[("LEGACY_SERVICE_URL", "not a url"), ("USE_MOCK_VALIDATION", "true")])
            .validation_mode(false)
            .unwrap();
        assert_eq!(mode, ValidationMode::Mock);
    }

    #[test]
    fn list_or_splits_and_trims() {
        let s = settings(&[("CORS_ORIGINS", "http://a, http://b,,")]);
        assert_eq!(s.list_or("CORS_ORIGINS", "*"), vec!["http://a", "http://b"]);
        assert_eq!(settings(&[]).list_or("CORS_ORIGINS", "*"), vec!["*"]);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = settings(&[("HOST", "   ")]);
        assert!(!s.is_set("HOST"));
        assert_eq!(s.string_or("HOST", "0.0.0.0"), "0.0.0.0");
    }
}
