use std::time::Duration;

use meshinv_infra::{ConfigError, Settings};

pub const DEFAULT_VALIDATOR_ID: &str = "legacy-validator-1.0.0";

/// Validator service configuration.
///
/// | Env Var                | Default                  |
/// |------------------------|--------------------------|
/// | `HOST`                 | `0.0.0.0`                |
/// | `PORT`                 | `8080`                   |
/// | `VALIDATOR_ID`         | `legacy-validator-1.0.0` |
/// | `VALIDATOR_LATENCY_MS` | `100`                    |
/// | `LOG_LEVEL`            | `info`                   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub host: String,
    pub port: u16,
    /// Reported in the `validator` field of every response.
    pub validator_id: String,
    /// Delay added after a successful validation, imitating the old system.
    pub simulated_latency: Duration,
    pub log_level: String,
}

impl ValidatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_settings(&Settings::from_env())
    }

    pub fn from_settings<F>(settings: &Settings<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: settings.string_or("HOST", "0.0.0.0"),
            port: settings.parse_or("PORT", 8080)?,
            validator_id: settings.string_or("VALIDATOR_ID", DEFAULT_VALIDATOR_ID),
            simulated_latency: Duration::from_millis(settings.parse_or("VALIDATOR_LATENCY_MS", 100)?),
            log_level: settings.string_or("LOG_LEVEL", "info").to_lowercase(),
        })
    }

    /// Local-only config with no simulated latency (tests, tooling).
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            validator_id: DEFAULT_VALIDATOR_ID.to_string(),
            simulated_latency: Duration::ZERO,
            log_level: "info".to_string(),
        }
    }
}
