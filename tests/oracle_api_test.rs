//! Wire-level tests for the OpenAI-compatible oracle adapter.
//!
//! Runs `OpenAiOracle` against a local mockito server and checks the
//! request shape on the wire: bearer auth, the full turn history resent on
//! every call, and temperature only when configured. Error paths cover
//! non-2xx statuses and structurally empty responses.

use mockito::Server;

use testforge::adapters::oracle::OpenAiOracle;
use testforge::domain::models::{Conversation, OracleConfig};
use testforge::domain::ports::Oracle;
use testforge::services::prompt_builder::corrective_request;
use testforge::DomainError;

// ============================================================================
// Test Helpers
// ============================================================================

/// Oracle pointed at the mock server, with a key so no environment lookup
/// happens.
fn oracle_for(server: &Server) -> OpenAiOracle {
    let config = OracleConfig::default()
        .with_base_url(server.url())
        .with_model("test-model")
        .with_api_key("test-key");
    OpenAiOracle::new(config).expect("failed to build oracle")
}

/// Chat completions response body with a single assistant reply.
fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30}
    })
    .to_string()
}

// ============================================================================
// Happy path: reply extraction and conversation growth
// ============================================================================

#[tokio::test]
async fn test_reply_returned_and_appended_as_assistant_turn() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("```c\nint main(void) { return 0; }\n```"))
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("You write C tests.");
    conversation.push_user("Write a test for add.");

    let reply = oracle
        .converse(&mut conversation)
        .await
        .expect("converse should succeed");

    assert_eq!(reply, "```c\nint main(void) { return 0; }\n```");
    assert_eq!(conversation.len(), 3);
    assert_eq!(conversation.last_assistant(), Some(reply.as_str()));
    mock.assert_async().await;
}

// ============================================================================
// Statelessness: every request carries the whole history
// ============================================================================

#[tokio::test]
async fn test_each_request_resends_the_full_history() {
    let mut server = Server::new_async().await;

    // First call: system + user.
    let first = server
        .mock("POST", "/chat/completions")
        .match_body(
            r#"{"model":"test-model","messages":[{"role":"system","content":"sys"},{"role":"user","content":"write a test"}]}"#,
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("first reply"))
        .create_async()
        .await;

    // Second call: the same turns plus the assistant reply and a follow-up.
    let second = server
        .mock("POST", "/chat/completions")
        .match_body(
            r#"{"model":"test-model","messages":[{"role":"system","content":"sys"},{"role":"user","content":"write a test"},{"role":"assistant","content":"first reply"},{"role":"user","content":"fix it"}]}"#,
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("second reply"))
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("sys");
    conversation.push_user("write a test");

    oracle
        .converse(&mut conversation)
        .await
        .expect("first call should succeed");
    conversation.push_user("fix it");
    oracle
        .converse(&mut conversation)
        .await
        .expect("second call should succeed");

    assert_eq!(conversation.len(), 5);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_corrective_followup_includes_compiler_stderr() {
    let mut server = Server::new_async().await;

    let first = server
        .mock("POST", "/chat/completions")
        .match_body(
            r#"{"model":"test-model","messages":[{"role":"system","content":"sys"},{"role":"user","content":"write a test"}]}"#,
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("broken candidate"))
        .create_async()
        .await;

    let followup = corrective_request("undefined reference to `add'");
    let second = server
        .mock("POST", "/chat/completions")
        .match_body(
            format!(
                r#"{{"model":"test-model","messages":[{{"role":"system","content":"sys"}},{{"role":"user","content":"write a test"}},{{"role":"assistant","content":"broken candidate"}},{{"role":"user","content":{}}}]}}"#,
                serde_json::to_string(&followup).expect("string encodes")
            )
            .as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("fixed candidate"))
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("sys");
    conversation.push_user("write a test");

    oracle
        .converse(&mut conversation)
        .await
        .expect("first call should succeed");
    conversation.push_user(followup);
    let reply = oracle
        .converse(&mut conversation)
        .await
        .expect("corrective call should succeed");

    assert_eq!(reply, "fixed candidate");
    first.assert_async().await;
    second.assert_async().await;
}

// ============================================================================
// Request options
// ============================================================================

#[tokio::test]
async fn test_temperature_sent_only_when_configured() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(
            r#"{"model":"test-model","messages":[{"role":"system","content":"sys"}],"temperature":0.2}"#,
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("ok"))
        .create_async()
        .await;

    let mut config = OracleConfig::default()
        .with_base_url(server.url())
        .with_model("test-model")
        .with_api_key("test-key");
    config.temperature = Some(0.2);
    let oracle = OpenAiOracle::new(config).expect("failed to build oracle");

    let mut conversation = Conversation::with_system("sys");
    oracle
        .converse(&mut conversation)
        .await
        .expect("converse should succeed");

    mock.assert_async().await;
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_api_error_status_surfaces_in_the_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("sys");
    conversation.push_user("write a test");

    let err = oracle
        .converse(&mut conversation)
        .await
        .expect_err("5xx should fail the call");

    assert!(matches!(err, DomainError::OracleUnavailable(_)));
    let message = err.to_string();
    assert!(message.contains("500"), "missing status in: {message}");
    assert!(
        message.contains("upstream exploded"),
        "missing body in: {message}"
    );
    // The failed call must not grow the history.
    assert_eq!(conversation.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_status_surfaces_in_the_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "rate limited"}}"#)
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("sys");

    let err = oracle
        .converse(&mut conversation)
        .await
        .expect_err("429 should fail the call");
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_empty_choices_is_an_empty_reply_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "chatcmpl-test", "object": "chat.completion", "choices": []}"#)
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("sys");

    let err = oracle
        .converse(&mut conversation)
        .await
        .expect_err("empty choices should fail the call");
    assert!(matches!(err, DomainError::EmptyReply));
}

#[tokio::test]
async fn test_malformed_response_body_fails_the_call() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let oracle = oracle_for(&server);
    let mut conversation = Conversation::with_system("sys");

    let result = oracle.converse(&mut conversation).await;
    assert!(result.is_err());
    assert_eq!(conversation.len(), 1);
}
