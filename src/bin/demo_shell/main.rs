mod handlers;
mod model;

use axum::{routing::get, Router};
use event_extractor::extraction::EventExtractor;
use event_extractor::startup;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{health_handler, index_handler, submit_handler};

#[derive(Clone)]
pub struct ShellState {
    /// Extractor shared by every page interaction
    pub extractor: EventExtractor,
}

/// Build the demo shell router
pub fn router(state: ShellState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    info!("Starting demo shell");

    let config = startup::load_config()?;
    let state = ShellState {
        extractor: startup::build_extractor(&config),
    };

    startup::serve(router(state), &config.demo_addr()).await?;
    Ok(())
}
