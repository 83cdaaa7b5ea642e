use crate::completion::{SchemaRequest, StructuredCompletion};
use crate::config::Config;
use crate::error::{CompletionError, ExtractionError};
use std::sync::Arc;
use tracing::{debug, error, info};

pub mod models;

pub use models::CalendarEvent;

/// System instruction sent with every extraction
pub const SYSTEM_PROMPT: &str = "Extract the event information.";

/// Text the demo shell starts with
pub const SAMPLE_TEXT: &str = "Alice and Bob are going to a science fair on Friday.";

/// Extracts a [`CalendarEvent`] from text with one structured completion call.
///
/// Holds no per-request state; clones share the same backend.
#[derive(Clone)]
pub struct EventExtractor {
    completion: Arc<dyn StructuredCompletion>,
    model: String,
}

impl EventExtractor {
    pub fn new(completion: Arc<dyn StructuredCompletion>, model: impl Into<String>) -> Self {
        Self {
            completion,
            model: model.into(),
        }
    }

    /// Build an extractor with the backend selected in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(crate::completion::from_config(config), config.openai_model.clone())
    }

    /// Whether the completion backend has a credential
    pub fn is_configured(&self) -> bool {
        self.completion.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Extract event information from `text`.
    ///
    /// Fails with [`ExtractionError::Configuration`] before any network call when
    /// no credential is configured. Every other failure is reported as
    /// [`ExtractionError::Extraction`] with the backend's description. The call is
    /// never retried.
    pub async fn extract(&self, text: &str) -> Result<CalendarEvent, ExtractionError> {
        if !self.is_configured() {
            error!("Extraction requested without a configured credential");
            return Err(ExtractionError::missing_credential());
        }

        info!(model = %self.model, text_len = text.len(), "Extracting event information");

        let request = SchemaRequest::for_type::<CalendarEvent>(&self.model, SYSTEM_PROMPT, text);
        let value = self.completion.complete(request).await.map_err(|e| {
            error!(kind = e.kind(), "Error extracting event: {}", e);
            ExtractionError::from(e)
        })?;

        let event: CalendarEvent = serde_json::from_value(value).map_err(|e| {
            let err = CompletionError::Parse(format!(
                "Response did not match the CalendarEvent schema: {}",
                e
            ));
            error!(kind = err.kind(), "Error extracting event: {}", err);
            ExtractionError::from(err)
        })?;

        debug!(
            name = %event.name,
            participants = event.participants.len(),
            "Event extracted"
        );

        Ok(event)
    }
}
