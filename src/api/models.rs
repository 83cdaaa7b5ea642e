use crate::extraction::CalendarEvent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SERVICE_NAME: &str = "Event Extractor API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request body for event extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// Successful extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub success: bool,
    pub event: CalendarEvent,
}

impl EventResponse {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            success: true,
            event,
        }
    }
}

/// Uniform error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Static description of the service served at `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub message: String,
    pub version: String,
    pub endpoints: Map<String, Value>,
}

impl Default for ServiceDescriptor {
    fn default() -> Self {
        let mut endpoints = Map::new();
        endpoints.insert(
            "POST /api/extract-event".to_string(),
            Value::String("Extract event information from text".to_string()),
        );

        Self {
            message: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            endpoints,
        }
    }
}
