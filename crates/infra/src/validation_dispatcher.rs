//! Item-code validation routing (in-process vs remote legacy service).
//!
//! ```text
//! caller (item creation)
//!   ↓
//! ValidationDispatcher::validate(code)
//!   ├─ Local  → RuleEngine::evaluate (in-process)
//!   └─ Remote → POST {base_url}/validate (bounded by timeout, no retry)
//!   ↓
//! ValidationResult
//! ```
//!
//! The mode is chosen once at startup and never changes for the lifetime of
//! the dispatcher. Every remote failure (connect, timeout, bad status,
//! undecodable body) is folded into [`ValidationResult::Invalid`]; nothing
//! escapes `validate` as an error.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use meshinv_validation::wire::ValidateRequest;
use meshinv_validation::{RuleEngine, ValidationResult};

/// Default bound on a remote validation call.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

pub const MSG_CONNECT: &str = "Cannot connect to validation service";
pub const MSG_TIMEOUT: &str = "Validation service timeout - please try again";
pub const MSG_UNEXPECTED: &str = "Unexpected validation error";
const MSG_UNKNOWN_RESULT: &str = "Unknown validation result";

/// Headers identifying this caller to the service mesh.
const MESH_HEADER: (&str, &str) = ("X-Service-Mesh", "true");
const SERVICE_NAME_HEADER: (&str, &str) = ("X-Service-Name", "inventory-backend");
const SERVICE_VERSION_HEADER: (&str, &str) = ("X-Service-Version", "1.0.0");

/// Startup selection of where validation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// Evaluate in-process ("mock" mode).
    Mock,
    /// Delegate to a remote validator ("legacy" mode).
    Legacy { base_url: String, timeout: Duration },
}

#[derive(Debug, Error)]
pub enum DispatcherBuildError {
    #[error("remote validator base url cannot be empty")]
    EmptyBaseUrl,

    #[error("invalid remote validator base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("remote validator timeout must be greater than zero")]
    ZeroTimeout,

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Routes validation to the local engine or a remote instance of it.
#[derive(Debug, Clone)]
pub enum ValidationDispatcher {
    Local(RuleEngine),
    Remote(RemoteValidator),
}

impl ValidationDispatcher {
    pub fn local(engine: RuleEngine) -> Self {
        Self::Local(engine)
    }

    /// Build the dispatcher for a configured mode. `engine` is only used in
    /// mock mode.
    pub fn from_mode(mode: &ValidationMode, engine: RuleEngine) -> Result<Self, DispatcherBuildError> {
        match mode {
            ValidationMode::Mock => Ok(Self::Local(engine)),
            ValidationMode::Legacy { base_url, timeout } => {
                Ok(Self::Remote(RemoteValidator::new(base_url.clone(), *timeout)?))
            }
        }
    }

    pub async fn validate(&self, code: &str) -> ValidationResult {
        match self {
            Self::Local(engine) => {
                tracing::info!(code = %code, "using mock validation for item code");
                engine.evaluate(code)
            }
            Self::Remote(remote) => remote.validate(code).await,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// `"mock"` or the remote base URL (for info endpoints).
    pub fn describe(&self) -> &str {
        match self {
            Self::Local(_) => "mock",
            Self::Remote(remote) => remote.base_url(),
        }
    }
}

/// Lenient view of the remote success body: missing or null fields fall back
/// to safe defaults instead of failing the call.
#[derive(Debug, Deserialize)]
struct RemoteVerdict {
    #[serde(default)]
    valid: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl From<RemoteVerdict> for ValidationResult {
    fn from(v: RemoteVerdict) -> Self {
        let message = v.message.unwrap_or_else(|| MSG_UNKNOWN_RESULT.to_string());
        if v.valid.unwrap_or(false) {
            ValidationResult::valid(message)
        } else {
            ValidationResult::invalid(message)
        }
    }
}

/// HTTP client for a remote validator instance.
#[derive(Debug, Clone)]
pub struct RemoteValidator {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteValidator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DispatcherBuildError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(DispatcherBuildError::EmptyBaseUrl);
        }
        check_base_url(&base_url)?;
        if timeout.is_zero() {
            return Err(DispatcherBuildError::ZeroTimeout);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Single attempt, no retry: the first failure is final.
    pub async fn validate(&self, code: &str) -> ValidationResult {
        let url = format!("{}/validate", self.base_url);
        tracing::info!(code = %code, url = %url, "validating item code with legacy service");

        let response = match self
            .client
            .post(&url)
            .header(MESH_HEADER.0, MESH_HEADER.1)
            .header(SERVICE_NAME_HEADER.0, SERVICE_NAME_HEADER.1)
            .header(SERVICE_VERSION_HEADER.0, SERVICE_VERSION_HEADER.1)
            .json(&ValidateRequest {
                code: code.to_string(),
            })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return self.transport_failure(e),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "legacy service returned error status");
            return ValidationResult::invalid(format!(
                "Validation service error: HTTP {}",
                status.as_u16()
            ));
        }

        match response.json::<RemoteVerdict>().await {
            Ok(verdict) => {
                let result = ValidationResult::from(verdict);
                tracing::info!(
                    valid = result.is_valid(),
                    message = %result.message(),
                    "legacy validation result"
                );
                result
            }
            // The body stream itself can still time out or drop.
            Err(e) if e.is_timeout() || e.is_connect() => self.transport_failure(e),
            Err(e) => {
                tracing::error!(error = %e, "unexpected error in legacy validation");
                ValidationResult::invalid(MSG_UNEXPECTED)
            }
        }
    }

    fn transport_failure(&self, e: reqwest::Error) -> ValidationResult {
        // A connect timeout is reported as a timeout.
        if e.is_timeout() {
            tracing::error!(timeout_ms = self.timeout.as_millis() as u64, "legacy validation service timeout");
            return ValidationResult::invalid(MSG_TIMEOUT);
        }
        if e.is_connect() {
            tracing::error!(url = %self.base_url, error = %e, "cannot connect to legacy service");
            return ValidationResult::invalid(MSG_CONNECT);
        }
        tracing::error!(error = %e, "legacy validation request failed");
        ValidationResult::invalid(format!("Validation service error: {e}"))
    }
}

/// The base URL must be absolute `http` or `https`.
pub fn check_base_url(base_url: &str) -> Result<(), DispatcherBuildError> {
    let invalid = |reason: String| DispatcherBuildError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = reqwest::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
