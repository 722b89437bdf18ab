//! Inventory API configuration, resolved once at startup.
//!
//! | Env Var                  | Default                      | Notes                                   |
//! |--------------------------|------------------------------|-----------------------------------------|
//! | `APP_ENV`                | `development`                | `development`/`testing`/`production`/`openshift` |
//! | `OPENSHIFT_BUILD_NAME`   | -                            | when set, profile is `openshift`        |
//! | `KUBERNETES_SERVICE_HOST`| -                            | when set, profile is `openshift`        |
//! | `HOST`                   | `0.0.0.0`                    |                                         |
//! | `PORT`                   | `5000`                       |                                         |
//! | `USE_MOCK_VALIDATION`    | `false`                      | always on for `testing`                 |
//! | `LEGACY_SERVICE_URL`     | `http://legacy-service:8080` |                                         |
//! | `LEGACY_SERVICE_TIMEOUT` | `10`                         | seconds                                 |
//! | `CORS_ORIGINS`           | `*`                          | comma-separated                         |
//! | `DEFAULT_PAGE_SIZE`      | `50`                         |                                         |
//! | `MAX_PAGE_SIZE`          | `100`                        |                                         |
//! | `LOG_LEVEL`              | per profile                  | `debug` / `info` / `warn`               |

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;

use meshinv_infra::{ConfigError, Settings, ValidationMode};

/// Deployment profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
    OpenShift,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
            Self::OpenShift => "openshift",
        }
    }

    fn default_log_level(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "warn",
            Self::Testing | Self::OpenShift => "info",
        }
    }

    /// Cluster markers win over `APP_ENV`.
    pub fn detect<F>(settings: &Settings<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if settings.is_set("OPENSHIFT_BUILD_NAME") || settings.is_set("KUBERNETES_SERVICE_HOST") {
            return Ok(Self::OpenShift);
        }
        settings.parse_or("APP_ENV", Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "default" => Ok(Self::Development),
            "testing" => Ok(Self::Testing),
            "production" => Ok(Self::Production),
            "openshift" => Ok(Self::OpenShift),
            other => Err(format!(
                "unknown profile `{other}` (expected development, testing, production or openshift)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub validation: ValidationMode,
    pub cors_origins: Vec<String>,
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_settings(&Settings::from_env())
    }

    pub fn from_settings<F>(settings: &Settings<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::detect(settings)?;
        let validation = settings.validation_mode(environment == Environment::Testing)?;

        let cors_origins = settings.list_or("CORS_ORIGINS", "*");
        for origin in cors_origins.iter().filter(|o| o.as_str() != "*") {
            HeaderValue::from_str(origin)
                .map_err(|e| ConfigError::invalid("CORS_ORIGINS", origin, e))?;
        }

        let max_page_size: u64 = settings.parse_or("MAX_PAGE_SIZE", 100)?;
        if max_page_size == 0 {
            return Err(ConfigError::invalid("MAX_PAGE_SIZE", "0", "must be greater than zero"));
        }
        let default_page_size: u64 = settings.parse_or("DEFAULT_PAGE_SIZE", 50)?;
        if default_page_size == 0 {
            return Err(ConfigError::invalid(
                "DEFAULT_PAGE_SIZE",
                "0",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            environment,
            host: settings.string_or("HOST", "0.0.0.0"),
            port: settings.parse_or("PORT", 5000)?,
            validation,
            cors_origins,
            default_page_size: default_page_size.min(max_page_size),
            max_page_size,
            log_level: settings
                .string_or("LOG_LEVEL", environment.default_log_level())
                .to_lowercase(),
        })
    }

    /// Testing profile on loopback with mock validation.
    pub fn for_tests() -> Self {
        Self {
            environment: Environment::Testing,
            host: "127.0.0.1".to_string(),
            port: 0,
            validation: ValidationMode::Mock,
            cors_origins: vec!["*".to_string()],
            default_page_size: 50,
            max_page_size: 100,
            log_level: "info".to_string(),
        }
    }

    pub fn cors_enabled(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_settings(&Settings::new(move |k: &str| map.get(k).cloned()))
    }

    #[test]
    fn development_defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.cors_origins, vec!["*"]);
        assert_eq!(cfg.default_page_size, 50);
        assert_eq!(cfg.max_page_size, 100);
        assert_eq!(
            cfg.validation,
            ValidationMode::Legacy {
                base_url: "http://legacy-service:8080".to_string(),
                timeout: Duration::from_secs(10),
            }
        );
    }

    #[test]
    fn testing_profile_forces_mock_validation() {
        let cfg = load(&[("APP_ENV", "Testing"), ("USE_MOCK_VALIDATION", "false")]).unwrap();
        assert_eq!(cfg.environment, Environment::Testing);
        assert_eq!(cfg.validation, ValidationMode::Mock);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn cluster_markers_select_openshift() {
        let cfg = load(&[
            ("APP_ENV", "production"),
            ("KUBERNETES_SERVICE_HOST", "10.0.0.1"),
        ])
        .unwrap();
        assert_eq!(cfg.environment, Environment::OpenShift);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn production_logs_warnings_unless_overridden() {
        assert_eq!(load(&[("APP_ENV", "production")]).unwrap().log_level, "warn");
        let cfg = load(&[("APP_ENV", "production"), ("LOG_LEVEL", "INFO")]).unwrap();
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let err = load(&[("APP_ENV", "staging")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "APP_ENV"));
    }

    #[test]
    fn profile_is_read_from_app_env_only() {
        let cfg = load(&[("FLASK_ENV", "production")]).unwrap();
        assert_eq!(cfg.environment, Environment::Development);
    }

    #[test]
    fn page_sizes_are_checked() {
        let cfg = load(&[("DEFAULT_PAGE_SIZE", "500")]).unwrap();
        assert_eq!(cfg.default_page_size, 100);

        assert!(load(&[("MAX_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("DEFAULT_PAGE_SIZE", "-1")]).is_err());
    }

    #[test]
    fn cors_origins_must_be_header_values() {
        let cfg = load(&[("CORS_ORIGINS", "http://localhost:3000, http://app.local")]).unwrap();
        assert_eq!(cfg.cors_origins, vec!["http://localhost:3000", "http://app.local"]);

        assert!(load(&[("CORS_ORIGINS", "http://bad\u{7f}origin")]).is_err());
    }
}
