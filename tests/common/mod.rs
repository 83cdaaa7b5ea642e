#![allow(dead_code)]

pub mod openai_stub;

use async_trait::async_trait;
use event_extractor::completion::{SchemaRequest, StructuredCompletion};
use event_extractor::error::CompletionError;
use event_extractor::extraction::EventExtractor;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SAMPLE_SENTENCE: &str = "Alice and Bob are going to a science fair on Friday.";

/// Mock completion service that counts calls and returns a canned reply
pub struct MockCompletion {
    configured: bool,
    reply: Result<Value, CompletionError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<SchemaRequest>>,
}

impl MockCompletion {
    /// Configured mock that returns `value`
    pub fn returning(value: Value) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            reply: Ok(value),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Configured mock that fails with `error`
    pub fn failing(error: CompletionError) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            reply: Err(error),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Mock without a credential
    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            reply: Ok(science_fair()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SchemaRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredCompletion for MockCompletion {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: SchemaRequest) -> Result<Value, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        self.reply.clone()
    }
}

/// The event the science fair sentence should produce
pub fn science_fair() -> Value {
    json!({
        "name": "science fair",
        "date": "Friday",
        "participants": ["Alice", "Bob"]
    })
}

pub fn extractor(mock: &Arc<MockCompletion>) -> EventExtractor {
    EventExtractor::new(mock.clone(), "gpt-4o-2024-08-06")
}
