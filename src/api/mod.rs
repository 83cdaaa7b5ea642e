//! HTTP API exposing the extraction function.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::extraction::EventExtractor;

pub mod handlers;
pub mod models;

pub use handlers::ApiError;

#[derive(Clone)]
pub struct AppState {
    /// Shared extractor; holds the long-lived completion client
    pub extractor: EventExtractor,
}

impl AppState {
    pub fn new(extractor: EventExtractor) -> Self {
        Self { extractor }
    }
}

/// Build the API router with permissive CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/api/extract-event", post(handlers::extract_event_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
