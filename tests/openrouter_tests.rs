//! OpenRouter chat tests against a mocked server: request shape,
//! attribution headers, content extraction, error propagation, and the
//! assembly fallback when generation is down.

use std::sync::Arc;

use astra::assembly::AnswerAssembler;
use astra::llm::{ChatClient, ChatMessage, OpenRouterClient, OpenRouterConfig};
use astra::types::{AppError, RetrievedDocument, SourceTag};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helpers =============

/// OpenRouter-shaped completion carrying a single assistant choice.
fn mock_completion_response(content: &str) -> serde_json::Value {
    json!({
        "id": "gen-1234",
        "model": "openai/gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ]
    })
}

/// Client pointed at the mock server, with both attribution headers set.
fn test_client(mock_server: &MockServer) -> OpenRouterClient {
    let config = OpenRouterConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        title: Some("astra".to_string()),
        timeout_secs: 5,
        ..OpenRouterConfig::default()
    };
    OpenRouterClient::new(config).unwrap()
}

fn conversation() -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("Answer with numbered citations."),
        ChatMessage::user("What does microgravity do to bone?"),
    ]
}

// ============= Chat Completion Tests =============

#[tokio::test]
async fn test_chat_posts_openai_shape_and_extracts_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("http-referer", "http://localhost:3000"))
        .and(header("x-title", "astra"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "Answer with numbered citations."},
                {"role": "user", "content": "What does microgravity do to bone?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion_response(
            "Microgravity accelerates bone density loss [1].",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let answer = client.chat(&conversation(), None, 0.2).await.unwrap();

    assert_eq!(answer, "Microgravity accelerates bone density loss [1].");
}

#[tokio::test]
async fn test_chat_forwards_a_model_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "x-ai/grok-4"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_completion_response("ok")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let answer = client
        .chat(&conversation(), Some("x-ai/grok-4"), 0.2)
        .await
        .unwrap();

    assert_eq!(answer, "ok");
}

#[tokio::test]
async fn test_chat_missing_content_yields_empty_string() {
    let mock_server = MockServer::start().await;

    // Some providers return a choice with no content, e.g. on a refusal.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant"}, "finish_reason": "stop"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let answer = client.chat(&conversation(), None, 0.2).await.unwrap();

    assert_eq!(answer, "");
}

#[tokio::test]
async fn test_chat_error_status_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.chat(&conversation(), None, 0.2).await.unwrap_err();

    assert!(matches!(err, AppError::LLM(_)));
    let message = err.to_string();
    assert!(message.contains("500"), "missing status in: {message}");
    assert!(
        message.contains("model overloaded"),
        "missing body in: {message}"
    );
}

#[tokio::test]
async fn test_chat_rejects_a_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.chat(&conversation(), None, 0.2).await.unwrap_err();

    assert!(matches!(err, AppError::LLM(_)));
    assert!(err.to_string().contains("decode"));
}

// ============= Assembly Degradation =============

#[tokio::test]
async fn test_assembly_degrades_when_openrouter_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("temporarily overloaded"))
        .mount(&mock_server)
        .await;

    let mut document = RetrievedDocument::new("Bone loss in orbit", SourceTag::Pubmed);
    document.snippet = Some("Astronauts lose bone mass on long missions.".to_string());

    let assembler = AnswerAssembler::new(Arc::new(test_client(&mock_server)));
    let result = assembler
        .assemble("What does microgravity do to bone?", None, &[document])
        .await;

    assert!(result.degraded);
    assert!(result.answer.starts_with("Preliminary synthesis (offline mode):"));
    assert_eq!(result.references.len(), 1);
    assert_eq!(result.references[0].index, 1);
}
