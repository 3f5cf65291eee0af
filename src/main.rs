//! Artifind API server
//!
//! This is the main entry point for the application.

use anyhow::Result;
use artifind::{
    config,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("artifind=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Artifind API v{}", artifind::VERSION);

    // Load configuration
    let settings = config::load()?;
    if settings.general.debug {
        info!("Debug mode enabled");
    }

    // Create application state
    let state = AppState::new(settings.clone())?;
    info!("Application state initialized");

    // Periodically forget clients whose rate allowance has refilled
    if let Some(limit) = state.rate_limit.clone() {
        let period = Duration::from_secs(settings.server.rate_limit.window_secs.max(60));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                limit.retain_recent();
            }
        });
    }

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Artifind API running on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
