pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod health_card;
pub mod identifier;
pub mod models;
pub mod portal;
pub mod records;
pub mod verification;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::PortalConfig;
use crate::portal::Portal;

/// Start the portal and serve until Ctrl-C.
pub async fn run() -> Result<(), String> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = PortalConfig::from_env();
    if config.delays == config::SimulatedDelays::none() {
        tracing::info!("Simulated delays disabled");
    }

    let portal = Arc::new(Portal::new(config));
    let mut server = api::server::start_server(portal).await?;

    tracing::info!(url = %server.session.url(), "Open the portal in a browser");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown();
    Ok(())
}
