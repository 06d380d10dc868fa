//! Integration tests for route resolution and the navigation guard.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test: a guarded view without a session redirects; no call is dispatched.
#[tokio::test]
async fn test_guard_redirects_without_session() {
    let server = MockServer::start().await;

    let temp = tempdir().unwrap();
    let output = Command::cargo_bin("mqdash")
        .unwrap()
        .env("MQDASH_HOME", temp.path())
        .env("MQDASH_BASE_URL", server.uri())
        .args(["open", "/devices"])
        .output()
        .unwrap();

    assert!(output.status.success(), "redirect is not an error");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("requires an authorized session"));
    assert!(stdout.contains("mqdash login"));

    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "the guarded view must never issue its API calls"
    );
}

/// Test: the login view is public either way.
#[test]
fn test_login_view_is_public() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("mqdash")
        .unwrap()
        .env("MQDASH_HOME", temp.path())
        .args(["open", "/login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mqdash login"));
}

/// Test: unknown paths are routing-not-found, reported as an error.
#[test]
fn test_unknown_path_not_found() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("mqdash")
        .unwrap()
        .env("MQDASH_HOME", temp.path())
        .args(["open", "/unknown"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No view registered for /unknown"));
}

/// Test: a parameterized route resolves its id and the detail view's
/// calls carry the bearer credential.
#[tokio::test]
async fn test_device_detail_resolves_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices/42"))
        .and(header("authorization", "Bearer abc123abc123abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "name": "greenhouse-probe",
            "device_type": "sensor",
            "status": "online",
            "location": null,
            "mqtt_config_id": null,
            "topic_config_id": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/devices/42/sensors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("session.json"),
        r#"{"token": "abc123abc123abc"}"#,
    )
    .unwrap();

    let output = Command::cargo_bin("mqdash")
        .unwrap()
        .env("MQDASH_HOME", temp.path())
        .env("MQDASH_BASE_URL", server.uri())
        .args(["devices", "show", "42"])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("greenhouse-probe"));
}

/// Test: with token auth disabled, guarded views open without a session
/// and calls carry no Authorization header.
#[tokio::test]
async fn test_auth_disabled_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("config.toml"),
        "enable_token_auth = false\n",
    )
    .unwrap();
    // Even a stored token is ignored in this mode.
    fs::write(
        temp.path().join("session.json"),
        r#"{"token": "leftover-token-xyz"}"#,
    )
    .unwrap();

    let output = Command::cargo_bin("mqdash")
        .unwrap()
        .env("MQDASH_HOME", temp.path())
        .env("MQDASH_BASE_URL", server.uri())
        .args(["open", "/devices"])
        .output()
        .unwrap();

    assert!(output.status.success(), "Command failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No devices registered"));
}
