//! End-to-end tests for `maxx ask` against a mock Chat Completions server.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temp MAXX_HOME directory for test isolation.
fn temp_maxx_home() -> TempDir {
    TempDir::new().expect("create temp maxx home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    }))
}

#[tokio::test]
async fn test_ask_sends_raw_prompt_and_prints_response() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let maxx_home = temp_maxx_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(completion("Soccer, obviously."))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("maxx")
        .env("MAXX_HOME", maxx_home.path())
        .env("OPENAI_API_KEY", "test-api-key")
        .env("OPENAI_BASE_URL", mock_server.uri())
        .args(["ask", "-p", ".soccer., what sport is this?"])
        .assert()
        .success()
        .stdout("Soccer, obviously.\n");

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("You are a mindreading bot.")
    );
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(
        body["messages"][1]["content"],
        ".soccer., what sport is this?"
    );

    let history = fs::read_to_string(maxx_home.path().join("history.jsonl")).unwrap();
    let record: Value = serde_json::from_str(history.lines().next().unwrap()).unwrap();
    assert_eq!(record["prompt"], ".soccer., what sport is this?");
    assert_eq!(record["response"], "Soccer, obviously.");
}

#[tokio::test]
async fn test_ask_model_flag_and_no_history() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let maxx_home = temp_maxx_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("maxx")
        .env("MAXX_HOME", maxx_home.path())
        .env("OPENAI_API_KEY", "test-api-key")
        .env("OPENAI_BASE_URL", mock_server.uri())
        .args(["--no-history", "ask", "-m", "gpt-4o-mini", "-p", "hello"])
        .assert()
        .success()
        .stdout("ok\n");

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert!(!maxx_home.path().join("history.jsonl").exists());
}

#[tokio::test]
async fn test_ask_surfaces_api_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let maxx_home = temp_maxx_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("maxx")
        .env("MAXX_HOME", maxx_home.path())
        .env("OPENAI_API_KEY", "bad-key")
        .env("OPENAI_BASE_URL", mock_server.uri())
        .args(["ask", "-p", "hello"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("HTTP 401: Incorrect API key provided"));

    assert!(!maxx_home.path().join("history.jsonl").exists());
}

#[tokio::test]
async fn test_piped_stdin_is_answered_without_tui() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let maxx_home = temp_maxx_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("piped answer"))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("maxx")
        .env("MAXX_HOME", maxx_home.path())
        .env("OPENAI_API_KEY", "test-api-key")
        .env("OPENAI_BASE_URL", mock_server.uri())
        .write_stdin(".42.what is the answer?\n")
        .assert()
        .success()
        .stdout("piped answer\n");

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][1]["content"], ".42.what is the answer?");
}

#[test]
fn test_ask_without_api_key_fails() {
    let maxx_home = temp_maxx_home();

    cargo_bin_cmd!("maxx")
        .env("MAXX_HOME", maxx_home.path())
        .env_remove("OPENAI_API_KEY")
        .args(["ask", "-p", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key available"));
}

#[test]
fn test_empty_pipe_is_rejected() {
    let maxx_home = temp_maxx_home();

    cargo_bin_cmd!("maxx")
        .env("MAXX_HOME", maxx_home.path())
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input provided via pipe"));
}
