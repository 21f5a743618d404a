//! HTTP API tests against a server tailing a temp log file.

use axum_test::TestServer;
use poelog_core::RecordingSink;
use poelog_server::{build_router, config::Config, state::AppState};
use serde_json::{json, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

struct TestApp {
    server: TestServer,
    state: Arc<AppState>,
    sink: Arc<RecordingSink>,
    log_path: PathBuf,
    _dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("Client.txt");
    std::fs::File::create(&log_path).unwrap();

    let config = Config {
        log_dir: dir.path().to_path_buf(),
        log_file: "Client.txt".to_string(),
        poll_interval_ms: 10,
        ..Config::default()
    };
    let sink = Arc::new(RecordingSink::default());
    let state = Arc::new(AppState::new(config, sink.clone()).unwrap());
    let server = TestServer::new(build_router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        sink,
        log_path,
        _dir: dir,
    }
}

fn append(path: &Path, seq: u64, contents: &str) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    write!(
        file,
        "2024/03/07 21:14:59 {seq} 19 [INFO Client 7620] {contents}\r\n"
    )
    .unwrap();
    file.flush().unwrap();
}

/// Wait for the tailer to ingest `count` messages.
async fn wait_for_history(state: &AppState, count: usize) {
    for _ in 0..500 {
        if state.messages.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "tailer never reached {} messages (got {})",
        count,
        state.messages.len()
    );
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;
    let response = app.server.get("/api/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_message_history() {
    let app = spawn_app().await;
    append(&app.log_path, 1, "#Alice: anyone selling maps?");
    append(&app.log_path, 2, "@From Bob: hey");
    wait_for_history(&app.state, 2).await;

    let response = app.server.get("/api/messages").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["messages"][0]["channel"], "global");
    assert_eq!(body["messages"][1]["channel"], "whisper");
    assert_eq!(body["messages"][1]["subject"], "Bob");

    // since filters by sequence id, limit takes from the tail.
    let response = app.server.get("/api/messages").add_query_param("since", 1).await;
    let body: Value = response.json();
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["sequence_id"], 2);

    let response = app.server.get("/api/messages").add_query_param("limit", 1).await;
    let body: Value = response.json();
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["sequence_id"], 2);
}

#[tokio::test]
async fn test_send_chat() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/chat")
        .json(&json!({"channel": "Whisper", "text": "one sec", "target": "Bob"}))
        .await;
    response.assert_status_ok();
    assert_eq!(app.sink.delivered(), vec!["@Bob one sec"]);
}

#[tokio::test]
async fn test_send_chat_rejects_bad_requests() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/chat")
        .json(&json!({"channel": "Shouting", "text": "hi"}))
        .await;
    response.assert_status_bad_request();

    let response = app
        .server
        .post("/api/chat")
        .json(&json!({"channel": "Whisper", "text": "hi"}))
        .await;
    response.assert_status_bad_request();

    assert!(app.sink.delivered().is_empty());
}

#[tokio::test]
async fn test_send_action() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/action")
        .json(&json!({"command": "hideout"}))
        .await;
    response.assert_status_ok();

    let response = app
        .server
        .post("/api/action")
        .json(&json!({"command": "whois", "args": "Bob"}))
        .await;
    response.assert_status_ok();

    let response = app
        .server
        .post("/api/action")
        .json(&json!({"command": "delve"}))
        .await;
    response.assert_status_bad_request();

    assert_eq!(app.sink.delivered(), vec!["/hideout", "/whois Bob"]);
}

#[tokio::test]
async fn test_vocab_endpoints() {
    let app = spawn_app().await;

    let response = app.server.get("/api/channels").await;
    response.assert_status_ok();
    let channels: Value = response.json();
    assert_eq!(channels.as_array().unwrap().len(), 6);
    assert!(channels
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["name"] == "Whisper" && c["prefix"] == "@"));

    let response = app.server.get("/api/commands").await;
    response.assert_status_ok();
    let commands: Value = response.json();
    assert_eq!(commands.as_array().unwrap().len(), 37);
    assert!(commands.as_array().unwrap().contains(&json!("hideout")));
}
