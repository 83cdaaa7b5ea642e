use super::{SchemaRequest, StructuredCompletion};
use crate::config::DEFAULT_BASE_URL;
use crate::error::CompletionError;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

impl<'a> From<&'a SchemaRequest> for ChatRequest<'a> {
    fn from(request: &'a SchemaRequest) -> Self {
        Self {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_text,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &request.schema_name,
                    strict: true,
                    schema: &request.schema,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// Interpret a chat completions response body as the structured value
pub(crate) fn parse_structured_content(body: &str) -> Result<Value, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::Parse(format!("Invalid response body: {}", e)))?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| CompletionError::Api("No response from OpenAI".into()))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.is_empty()) {
        return Err(CompletionError::Refusal(refusal));
    }

    let content = message
        .content
        .ok_or_else(|| CompletionError::Parse("Response contained no content".into()))?;

    serde_json::from_str(&content)
        .map_err(|e| CompletionError::Parse(format!("Content is not valid JSON: {}", e)))
}

/// Structured completion through the OpenAI chat completions API.
///
/// The underlying HTTP client is created once and shared by every call.
#[derive(Clone)]
pub struct OpenAiCompletion {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiCompletion {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, local stubs)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StructuredCompletion for OpenAiCompletion {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: SchemaRequest) -> Result<Value, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::Api("Missing API key".into()))?;

        let start = Instant::now();
        let body = ChatRequest::from(&request);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                CompletionError::Network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = %status, error = %text, "OpenAI API error");
            return Err(CompletionError::Api(format!("{} {}", status, text)));
        }

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI structured completion"
        );

        parse_structured_content(&text)
    }
}
