// gardener-gateway - Offline-capable asset gateway for the Gardener plant-care assistant
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use gardener_gateway::assets::{AssetCacheManager, MemoryCacheStorage};
use gardener_gateway::cli::Args;
use gardener_gateway::config::AppConfig;
use gardener_gateway::server::create_router;
use gardener_gateway::upstream::AssistantClient;
use gardener_gateway::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting gardener-gateway v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the upstream AI proxy client
    info!("Upstream AI proxy endpoint: {}", config.upstream.api_url);
    let upstream = AssistantClient::new(&config.upstream)?;

    // Phase 4: Install and activate the asset cache
    let storage = Arc::new(MemoryCacheStorage::new());
    let assets = AssetCacheManager::new(storage, config.assets.clone())?;
    match assets.install().await {
        Ok(()) => {
            // Activation runs only after a committed install; it retires
            // every generation but the current one
            assets.activate()?;
            info!("Asset cache generation {} active", config.assets.cache_version);
        }
        Err(e) => {
            // A failed install leaves any previous generation authoritative;
            // with none, every asset request passes through to the network
            warn!("Asset precache failed, continuing without it: {}", e);
        }
    }

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), assets, upstream)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
