use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::models::{ErrorResponse, EventResponse, ExtractRequest, ServiceDescriptor};
use super::AppState;
use crate::error::ExtractionError;

/// Error returned by API handlers, rendered as the `{success:false}` envelope
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be read as `{text}`
    BadRequest(StatusCode, String),
    /// Extraction did not produce an event
    Extraction(ExtractionError),
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        ApiError::Extraction(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(status, message) => (status, message),
            ApiError::Extraction(ExtractionError::Configuration(message)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ApiError::Extraction(ExtractionError::Extraction(description)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to extract event information: {}", description),
            ),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Handler for the service descriptor
pub async fn root_handler() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::default())
}

/// Handler for event extraction
pub async fn extract_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<EventResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        error!("Rejected extraction request: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    if !state.extractor.is_configured() {
        error!("OpenAI API key not configured");
        return Err(ExtractionError::missing_credential().into());
    }

    let event = state.extractor.extract(&request.text).await?;
    info!(name = %event.name, "Event extracted successfully");

    Ok(Json(EventResponse::new(event)))
}
