//! Structured completion backends.
//!
//! A backend takes a system prompt, the user's text and a JSON schema, makes
//! exactly one call to the model provider and returns the JSON value the model
//! produced. Interpreting that value is left to the caller.

use crate::config::{CompletionBackend, Config};
use crate::error::CompletionError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod openai;
pub mod rig_backend;
pub mod schema;

pub use openai::OpenAiCompletion;
pub use rig_backend::RigCompletion;
pub use schema::StructuredOutput;

/// One complete-with-schema request
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_text: String,
    /// Name the schema is registered under
    pub schema_name: String,
    pub schema: Value,
}

impl SchemaRequest {
    /// Build a request whose schema is derived from `T`
    pub fn for_type<T: StructuredOutput>(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_text: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_text: user_text.into(),
            schema_name: T::type_name(),
            schema: T::openai_schema(),
        }
    }
}

/// External service that returns data conforming to a declared schema
#[async_trait]
pub trait StructuredCompletion: Send + Sync {
    /// Whether a credential is available for the service
    fn is_configured(&self) -> bool;

    /// Perform a single structured completion call
    async fn complete(&self, request: SchemaRequest) -> Result<Value, CompletionError>;
}

/// Build the backend selected in the configuration
pub fn from_config(config: &Config) -> Arc<dyn StructuredCompletion> {
    let api_key = config.openai_api_key.clone();
    match config.backend {
        CompletionBackend::OpenAi => {
            Arc::new(OpenAiCompletion::new(api_key).with_base_url(&config.openai_base_url))
        }
        CompletionBackend::Rig => Arc::new(RigCompletion::new(
            api_key.as_deref(),
            &config.openai_base_url,
        )),
    }
}
