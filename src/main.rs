use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worldwire::config::Config;
use worldwire::fetcher::Fetcher;
use worldwire::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worldwire=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("WORLDWIRE_CONFIG").unwrap_or_else(|_| "worldwire.toml".to_string());
    let config = Config::load_or_default(&config_path)?.with_env_overrides();

    // Create upstream client
    let fetcher = Fetcher::new(&config.guardian).context("invalid upstream configuration")?;
    info!("Using upstream {}", config.guardian.base_url);

    let state = Arc::new(AppState { fetcher });
    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Server starting on http://{}", config.server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
