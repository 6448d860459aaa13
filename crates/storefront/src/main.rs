use anyhow::{Context, Result};
use shared::{
    config::Config,
    utils::{Telemetry, init_logger},
};
use storefront::{handler::AppRouter, state::AppState};
use tracing::{error, info};

const SERVICE_NAME: &str = "storefront";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = config
        .otel_endpoint
        .as_deref()
        .map(|endpoint| Telemetry::init(SERVICE_NAME, endpoint))
        .transpose()
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    )?;

    info!(
        "🚀 Starting {SERVICE_NAME} with {:?} storage on port {}",
        config.storage, config.port
    );

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down...");

    if let Some(Err(e)) = telemetry.map(Telemetry::shutdown) {
        error!("Failed to shutdown telemetry: {e}");
    }

    Ok(())
}
