// Main entry point for the job sync API server

use std::sync::Arc;

use anyhow::{Context, Result};
use jobsync_core::{kernel::start_scheduler, kernel::ServerDeps, server::build_app, Config};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobsync_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting job sync server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        sources = %config.sources_path.display(),
        concurrency = config.sync_concurrency,
        "Configuration loaded"
    );

    let deps = Arc::new(ServerDeps::from_config(&config).context("Failed to build dependencies")?);
    tracing::info!(boards = ?deps.boards.boards(), "Board adapters registered");

    let shutdown = CancellationToken::new();

    let mut scheduler = start_scheduler(deps.clone(), &config.sync_schedule, shutdown.clone())
        .await
        .context("Failed to start scheduler")?;

    let app = build_app(deps, shutdown.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await
        .context("Server error")?;

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Scheduler shutdown failed: {}", e);
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolve on Ctrl-C, cancelling any sync run in progress.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
