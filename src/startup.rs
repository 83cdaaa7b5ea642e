use crate::config::Config;
use crate::error::{AppResult, Error};
use crate::extraction::EventExtractor;
use crate::shutdown;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> AppResult<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Server(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config, logging failures
pub fn load_config() -> AppResult<Config> {
    match Config::load() {
        Ok(config) => {
            info!(?config, "Configuration loaded");
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e)
        }
    }
}

/// Build the shared extractor, warning when no credential is present
pub fn build_extractor(config: &Config) -> EventExtractor {
    if !config.has_credential() {
        warn!("OPENAI_API_KEY is not set; extraction requests will fail until it is configured");
    }
    info!(
        backend = ?config.backend,
        model = %config.openai_model,
        "Using completion backend"
    );
    EventExtractor::from_config(config)
}

/// Bind `addr` and serve `app` until a termination signal arrives
pub async fn serve(app: Router, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(|e| Error::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}
