//! Chat completion client against a mock provider.

use mockito::{Matcher, Server};
use serde_json::json;
use shadcn_mcp_core::LlmSettings;
use shadcn_mcp_core::traits::{CompletionRequest, LlmClient};
use shadcn_mcp_generator::OpenRouterClient;
use std::time::Duration;

fn client_for(server: &Server) -> OpenRouterClient {
    let mut settings = LlmSettings::new("sk-test", "openai/gpt-4o-mini");
    settings.base_url = format!("{}/api/v1", server.url());
    OpenRouterClient::new(&settings)
        .unwrap()
        .with_retry_backoff(Duration::from_millis(1))
}

#[tokio::test]
async fn test_completion_returns_first_choice() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "openai/gpt-4o-mini",
            "max_tokens": 2000,
            "messages": [
                {"role": "system", "content": "pick components"},
                {"role": "user", "content": "a login form"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "{\"components\": []}"}}]}"#)
        .create_async()
        .await;

    let text = client_for(&server)
        .complete(CompletionRequest::new("pick components", "a login form", 2000))
        .await
        .unwrap();

    assert_eq!(text, r#"{"components": []}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(503)
        .with_body("upstream overloaded")
        .expect(3)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(CompletionRequest::new("s", "u", 10).with_retries(2))
        .await
        .unwrap_err();

    assert!(err.is_llm_error());
    assert!(err.to_string().contains("503"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "No auth credentials found"}}"#)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(CompletionRequest::new("s", "u", 10).with_retries(2))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("No auth credentials found"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(CompletionRequest::new("s", "u", 10))
        .await
        .unwrap_err();

    assert!(err.is_llm_error());
    assert!(err.to_string().contains("no text"));
}
