use std::time::{Duration, Instant};

use axum::{
    http::{HeaderMap, StatusCode as AxumStatus},
    routing::post,
    Json, Router,
};
use reqwest::StatusCode;
use serde_json::json;

use meshinv_api::config::AppConfig;
use meshinv_infra::{RemoteValidator, ValidationDispatcher, ValidationMode};
use meshinv_validation::{RuleEngine, ValidationResult};
use meshinv_validator::config::ValidatorConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn validator(config: ValidatorConfig) -> Self {
        Self::spawn(meshinv_validator::app::build_app(config)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn remote(base_url: &str, timeout: Duration) -> ValidationDispatcher {
    let mode = ValidationMode::Legacy {
        base_url: base_url.to_string(),
        timeout,
    };
    ValidationDispatcher::from_mode(&mode, RuleEngine::legacy()).unwrap()
}

/// A `/validate` stub with a fixed answer.
fn stub(status: AxumStatus, body: &'static str) -> Router {
    Router::new().route("/validate", post(move || async move { (status, body) }))
}

#[tokio::test]
async fn remote_results_match_local_results() {
    let srv = TestServer::validator(ValidatorConfig::for_tests()).await;
    let remote = remote(&format!("{}/", srv.base_url), Duration::from_secs(5));
    let local = ValidationDispatcher::local(RuleEngine::legacy());

    for code in ["AB12CD", "XX1234", "AB1000", "LEGACY", "ABCDE5", "ABC", "1ABCDE", ""] {
        assert_eq!(remote.validate(code).await, local.validate(code).await, "code {code:?}");
    }
}

#[tokio::test]
async fn remote_call_carries_mesh_headers() {
    async fn check_headers(headers: HeaderMap) -> Json<serde_json::Value> {
        let mesh = headers.get("x-service-mesh").and_then(|v| v.to_str().ok());
        let name = headers.get("x-service-name").and_then(|v| v.to_str().ok());
        let version = headers.get("x-service-version").and_then(|v| v.to_str().ok());
        Json(json!({
            "valid": mesh == Some("true")
                && name == Some("inventory-backend")
                && version == Some("1.0.0"),
            "message": "headers checked",
        }))
    }

    let srv = TestServer::spawn(Router::new().route("/validate", post(check_headers))).await;
    let result = remote(&srv.base_url, Duration::from_secs(5)).validate("AB12CD").await;
    assert_eq!(result, ValidationResult::valid("headers checked"));
}

#[tokio::test]
async fn slow_validator_times_out_within_bound() {
    let mut config = ValidatorConfig::for_tests();
    config.simulated_latency = Duration::from_secs(5);
    let srv = TestServer::validator(config).await;

    let started = Instant::now();
    let result = remote(&srv.base_url, Duration::from_millis(200))
        .validate("AB12CD")
        .await;

    assert_eq!(
        result,
        ValidationResult::invalid("Validation service timeout - please try again")
    );
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn unreachable_validator_reports_connect_failure() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = remote(&format!("http://{addr}"), Duration::from_secs(2))
        .validate("AB12CD")
        .await;
    assert_eq!(
        result,
        ValidationResult::invalid("Cannot connect to validation service")
    );
}

#[tokio::test]
async fn dropped_connection_is_a_generic_service_error() {
    // Accepts, then closes without writing a response.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            drop(stream);
        }
    });

    let result = remote(&format!("http://{addr}"), Duration::from_secs(2))
        .validate("AB12CD")
        .await;
    handle.abort();

    assert!(!result.is_valid());
    let message = result.message();
    assert!(
        message.starts_with("Validation service error: "),
        "unexpected message: {message}"
    );
    assert!(!message.contains("HTTP "));
    assert_ne!(message, "Cannot connect to validation service");
    assert_ne!(message, "Validation service timeout - please try again");
}

#[tokio::test]
async fn error_status_is_reported_with_code() {
    let srv = TestServer::spawn(stub(AxumStatus::SERVICE_UNAVAILABLE, "down for maintenance")).await;
    let result = remote(&srv.base_url, Duration::from_secs(2)).validate("AB12CD").await;
    assert_eq!(
        result,
        ValidationResult::invalid("Validation service error: HTTP 503")
    );
}

#[tokio::test]
async fn validator_400_is_an_error_status_too() {
    // Missing code never happens from the dispatcher, but a 400 from a
    // misbehaving service must still fail closed.
    let srv = TestServer::spawn(stub(AxumStatus::BAD_REQUEST, r#"{"valid": false}"#)).await;
    let result = remote(&srv.base_url, Duration::from_secs(2)).validate("AB12CD").await;
    assert_eq!(
        result,
        ValidationResult::invalid("Validation service error: HTTP 400")
    );
}

#[tokio::test]
async fn lenient_success_bodies_fail_closed() {
    let srv = TestServer::spawn(stub(AxumStatus::OK, r#"{"message": "looks fine"}"#)).await;
    let result = remote(&srv.base_url, Duration::from_secs(2)).validate("AB12CD").await;
    assert_eq!(result, ValidationResult::invalid("looks fine"));

    let srv = TestServer::spawn(stub(AxumStatus::OK, r#"{"valid": true}"#)).await;
    let result = remote(&srv.base_url, Duration::from_secs(2)).validate("AB12CD").await;
    assert_eq!(result, ValidationResult::valid("Unknown validation result"));
}

#[tokio::test]
async fn undecodable_body_is_unexpected_error() {
    let srv = TestServer::spawn(stub(AxumStatus::OK, "<html>legacy</html>")).await;
    let result = remote(&srv.base_url, Duration::from_secs(2)).validate("AB12CD").await;
    assert_eq!(result, ValidationResult::invalid("Unexpected validation error"));
}

#[tokio::test]
async fn remote_validator_construction() {
    let remote = RemoteValidator::new("http://legacy-service:8080/", Duration::from_secs(3)).unwrap();
    assert_eq!(remote.base_url(), "http://legacy-service:8080");

    assert!(RemoteValidator::new("not a url", Duration::from_secs(3)).is_err());

    let mut config = AppConfig::for_tests();
    config.validation = ValidationMode::Legacy {
        base_url: "legacy-service:8080".to_string(),
        timeout: Duration::from_secs(3),
    };
    assert!(meshinv_api::app::build_app(config).is_err());
}

fn legacy_api_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::for_tests();
    config.validation = ValidationMode::Legacy {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
    };
    config
}

#[tokio::test]
async fn api_in_legacy_mode_delegates_to_validator_service() {
    let validator = TestServer::validator(ValidatorConfig::for_tests()).await;
    let app = meshinv_api::app::build_app(legacy_api_config(&validator.base_url)).unwrap();
    let api = TestServer::spawn(app).await;
    let client = reqwest::Client::new();

    let info: serde_json::Value = client
        .get(format!("{}/info", api.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info["features"]["legacy_integration"], true);
    assert_eq!(info["configuration"]["legacy_service_url"], validator.base_url.as_str());

    let res = client
        .post(format!("{}/api/inventory", api.base_url))
        .json(&json!({ "code": "bolt42", "name": "Hex Bolt", "quantity": 100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/api/inventory", api.base_url))
        .json(&json!({ "code": "DEMO12", "name": "Demo", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid item code: Item code cannot start with prohibited prefix: DEMO"
    );
}

#[tokio::test]
async fn api_rejects_creation_when_validator_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = meshinv_api::app::build_app(legacy_api_config(&format!("http://{addr}"))).unwrap();
    let api = TestServer::spawn(app).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/inventory", api.base_url))
        .json(&json!({ "code": "AB12CD", "name": "Widget", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid item code: Cannot connect to validation service"
    );

    let list: serde_json::Value = client
        .get(format!("{}/api/inventory", api.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["pagination"]["total"], 0);
}
