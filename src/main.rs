use anyhow::Context;
use smart_checkout::{shared::logging::LoggingUtils, AppConfig, HttpServer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    LoggingUtils::initialize(&config.logging.level, &config.logging.format, config.logging.structured)
        .context("Failed to initialize logging")?;

    info!("Starting Smart Checkout server...");

    let server = HttpServer::new(config)
        .await
        .context("Failed to initialize server")?;

    info!("Server starting on {}", server.config().server_address());

    server.run().await.context("Server error")?;
    Ok(())
}
