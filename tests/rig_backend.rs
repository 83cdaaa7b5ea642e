mod common;

use axum::http::StatusCode;
use common::openai_stub::{start_stub, StubReply};
use common::{science_fair, SAMPLE_SENTENCE};
use event_extractor::completion::{RigCompletion, SchemaRequest, StructuredCompletion};
use event_extractor::error::{CompletionError, ExtractionError};
use event_extractor::extraction::{CalendarEvent, EventExtractor, SYSTEM_PROMPT};
use serde_json::json;
use std::sync::Arc;

const MODEL: &str = "gpt-4o-2024-08-06";

/// Chat completion in which the model calls Rig's `submit` tool
fn submit_tool_call() -> StubReply {
    StubReply {
        status: StatusCode::OK,
        body: json!({
            "id": "chatcmpl-rig-1",
            "object": "chat.completion",
            "created": 1_728_000_000u64,
            "model": MODEL,
            "system_fingerprint": "fp_test",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "submit",
                            "arguments": science_fair().to_string()
                        }
                    }]
                },
                "logprobs": null,
                "finish_reason": "tool_calls"
            }],
            "usage": { "prompt_tokens": 82, "completion_tokens": 21, "total_tokens": 103 }
        }),
    }
}

fn request() -> SchemaRequest {
    SchemaRequest::for_type::<CalendarEvent>(MODEL, SYSTEM_PROMPT, SAMPLE_SENTENCE)
}

#[tokio::test]
async fn test_submit_tool_call_becomes_event() {
    let (base_url, seen) = start_stub(submit_tool_call()).await;
    let backend = RigCompletion::new(Some("sk-test"), &base_url);

    let value = backend.complete(request()).await.unwrap();
    assert_eq!(value, science_fair());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], MODEL);
    assert_eq!(body["tools"][0]["function"]["name"], "submit");
}

#[tokio::test]
async fn test_extractor_over_rig_backend() {
    let (base_url, _) = start_stub(submit_tool_call()).await;
    let extractor = EventExtractor::new(
        Arc::new(RigCompletion::new(Some("sk-test"), &base_url)),
        MODEL,
    );

    let event = extractor.extract(SAMPLE_SENTENCE).await.unwrap();
    assert_eq!(event.name, "science fair");
    assert_eq!(event.date, "Friday");
    assert_eq!(event.participants, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn test_provider_error_is_an_api_error() {
    let (base_url, seen) = start_stub(StubReply {
        status: StatusCode::TOO_MANY_REQUESTS,
        body: json!({ "error": { "message": "Rate limit reached" } }),
    })
    .await;
    let backend = RigCompletion::new(Some("sk-test"), &base_url);

    let err = backend.complete(request()).await.unwrap_err();
    match err {
        CompletionError::Api(message) => {
            assert!(message.starts_with("Rig extraction failed"));
            assert!(message.contains("Rate limit reached"));
        }
        other => panic!("expected an API error, got {:?}", other),
    }
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_foreign_schema_never_reaches_server() {
    let (base_url, seen) = start_stub(submit_tool_call()).await;
    let backend = RigCompletion::new(Some("sk-test"), &base_url);

    let mut request = request();
    request.schema_name = "Invoice".into();
    let err = backend.complete(request).await.unwrap_err();

    assert!(matches!(err, CompletionError::Api(_)));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_key_is_a_configuration_error() {
    let extractor = EventExtractor::new(
        Arc::new(RigCompletion::new(None, "http://127.0.0.1:9/v1")),
        MODEL,
    );
    let err = extractor.extract(SAMPLE_SENTENCE).await.unwrap_err();
    assert!(matches!(err, ExtractionError::Configuration(_)));
}
