use event_extractor::api::{self, AppState};
use event_extractor::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Event Extractor API");

    // Load configuration
    let config = startup::load_config()?;

    let state = AppState::new(startup::build_extractor(&config));
    let app = api::router(state);

    startup::serve(app, &config.api_addr()).await?;
    Ok(())
}
