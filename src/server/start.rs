use anyhow::{Result, anyhow};
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::logs::init_logging_and_metrics;
use crate::server::{AppState, create_router};
use crate::utils::format_duration;

/// Configuration for server startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub json_logs: bool,
}

/// Start the HTTP server based on the provided configuration
pub async fn start_server(config: ServerConfig) -> Result<()> {
    // Extract configuration values
    let ServerConfig {
        bind_address,
        json_logs,
    } = config;
    // Initialize structured logging and metrics
    init_logging_and_metrics(json_logs);
    // Output debugging information
    info!(
        bind_address = %bind_address,
        json_logs,
        "Server configuration loaded"
    );
    // Serve until shutdown, logging any startup failure
    if let Err(e) = serve(&bind_address).await {
        error!(
            bind_address = %bind_address,
            error = %e,
            "HTTP server failed"
        );
        return Err(e);
    }
    // All ok
    Ok(())
}

/// Bind the listener and serve the router until a shutdown signal arrives
async fn serve(bind_address: &str) -> Result<()> {
    // Record when the server started
    let started_at = Instant::now();
    // Create a TCP listener for the HTTP server
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(|e| anyhow!("Failed to bind to address {bind_address}: {e}"))?;
    // Output debugging information
    info!(
        local_addr = ?listener.local_addr().ok(),
        "Starting HTTP server"
    );
    // Create the Axum router
    let router = create_router(AppState::default());
    // Serve the Axum router over HTTP
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("HTTP server error: {e}"))?;
    // Output debugging information
    info!(
        uptime = %format_duration(started_at.elapsed()),
        "HTTP server stopped"
    );
    Ok(())
}

/// Resolve once Ctrl+C or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    // Output debugging information
    info!("Shutdown signal received");
}
