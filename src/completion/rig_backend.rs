use super::{SchemaRequest, StructuredCompletion};
use crate::error::CompletionError;
use crate::extraction::models::CalendarEvent;
use async_trait::async_trait;
use rig::providers::openai;
use serde_json::Value;
use tracing::{debug, info};

/// Structured completion through Rig's extractor on the OpenAI provider.
///
/// Rig derives the tool schema from [`CalendarEvent`] itself, so the schema
/// carried by the request is only checked by name.
#[derive(Clone)]
pub struct RigCompletion {
    client: Option<openai::Client>,
}

impl RigCompletion {
    pub fn new(api_key: Option<&str>, base_url: &str) -> Self {
        Self {
            client: api_key.map(|key| openai::Client::from_url(key, base_url)),
        }
    }
}

#[async_trait]
impl StructuredCompletion for RigCompletion {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn complete(&self, request: SchemaRequest) -> Result<Value, CompletionError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CompletionError::Api("Missing API key".into()))?;

        if request.schema_name != "CalendarEvent" {
            return Err(CompletionError::Api(format!(
                "Rig backend cannot produce schema {}",
                request.schema_name
            )));
        }

        info!(model = %request.model, "Calling OpenAI through Rig extractor");

        let extractor = client
            .extractor::<CalendarEvent>(&request.model)
            .preamble(&request.system_prompt)
            .build();

        let event = extractor
            .extract(request.user_text.as_str())
            .await
            .map_err(|e| CompletionError::Api(format!("Rig extraction failed: {}", e)))?;

        debug!(participants = event.participants.len(), "Rig extractor returned event");

        serde_json::to_value(event).map_err(|e| CompletionError::Parse(e.to_string()))
    }
}
