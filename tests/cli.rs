mod common;

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

use common::MockServer;

fn sakhatype(storage: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("sakhatype"));
    cmd.env("SAKHATYPE_STORAGE", storage)
        .env_remove("SAKHATYPE_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn storage_file() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    (dir, path)
}

fn stored(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn sound_preference_round_trips_between_runs() {
    let (_dir, path) = storage_file();

    sakhatype(&path).arg("sound").assert().success().stdout("sound on\n");
    sakhatype(&path)
        .args(["sound", "off"])
        .assert()
        .success()
        .stdout("sound off\n");
    sakhatype(&path).arg("sound").assert().success().stdout("sound off\n");

    assert_eq!(stored(&path)["soundEnabled"], "false");
}

#[test]
fn logout_removes_persisted_session() {
    let (_dir, path) = storage_file();
    fs::write(
        &path,
        json!({"token": "tok", "username": "alice", "soundEnabled": "false"}).to_string(),
    )
    .unwrap();

    sakhatype(&path)
        .arg("logout")
        .assert()
        .success()
        .stdout("logged out\n");

    let after = stored(&path);
    assert!(after.get("token").is_none());
    assert!(after.get("username").is_none());
    assert_eq!(after["soundEnabled"], "false");
}

#[test]
fn invalid_submission_is_rejected_before_sending() {
    let (_dir, path) = storage_file();

    // Nothing listens on port 9; validation must fail first.
    sakhatype(&path)
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "submit",
            "--wpm",
            "50",
            "--raw-wpm",
            "55",
            "--accuracy",
            "140",
            "--burst-wpm",
            "80",
            "--errors",
            "2",
            "--time-mode",
            "30",
            "--duration",
            "30",
        ])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn leaderboard_command_prints_server_order() {
    let router = Router::new().route(
        "/api/leaderboard/wpm",
        get(|| async {
            Json(json!([
                {"username": "zed", "total_tests": 3, "best_wpm": 90.0, "best_accuracy": 95.0, "level": 2},
                {"username": "amy", "total_tests": 9, "best_wpm": 120.0, "best_accuracy": 99.0, "level": 6}
            ]))
        }),
    );
    let server = MockServer::start(router).await;
    let (_dir, path) = storage_file();
    let base_url = server.base_url.clone();

    let output = tokio::task::spawn_blocking(move || {
        sakhatype(&path)
            .args(["--api-url", &base_url, "leaderboard", "wpm", "--limit", "5"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed[0]["username"], "zed");
    assert_eq!(printed[1]["username"], "amy");
    assert_eq!(server.recorder.last().uri, "/api/leaderboard/wpm?limit=5");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_clears_stored_session() {
    let router = Router::new().route(
        "/api/users/me",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Could not validate credentials"})),
            )
        }),
    );
    let server = MockServer::start(router).await;
    let (_dir, path) = storage_file();
    fs::write(&path, json!({"token": "stale", "username": "alice"}).to_string()).unwrap();
    let base_url = server.base_url.clone();
    let storage = path.clone();

    let output = tokio::task::spawn_blocking(move || {
        sakhatype(&storage)
            .args(["--api-url", &base_url, "whoami"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not validate credentials"));
    assert_eq!(
        server.recorder.last().header("authorization"),
        Some("Bearer stale")
    );
    assert!(stored(&path).get("token").is_none());
}
