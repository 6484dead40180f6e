//! Redis Proxy - a read-through caching proxy for Redis
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Connect to the backing Redis instance
//! 4. Create the shared cache and resolver
//! 5. Start background TTL cleanup task
//! 6. Start the RESP listener
//! 7. Start the HTTP server
//! 8. Handle graceful shutdown on SIGINT/SIGTERM

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_proxy::api::create_router;
use redis_proxy::store::RedisStore;
use redis_proxy::{resp, spawn_cleanup_task, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis Proxy");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: key_size={}, global_expiry_ms={}, redis={}:{}, http={}, resp={}, rate_limit_rps={}",
        config.key_size,
        config.global_expiry_ms,
        config.redis_host,
        config.redis_port,
        config.http_address,
        config.resp_address,
        config.rate_limit_rps
    );

    let store = RedisStore::connect(&config.redis_url())
        .await
        .with_context(|| format!("failed to connect to Redis at {}", config.redis_url()))?;

    let state = AppState::from_config(&config, Arc::new(store));
    info!("Cache initialized");

    let mut background: Vec<JoinHandle<()>> = Vec::new();

    if let Some(interval) = config.cleanup_interval() {
        background.push(spawn_cleanup_task(state.cache().clone(), interval));
        info!("Background cleanup task started");
    }

    let resp_listener = TcpListener::bind(&config.resp_address)
        .await
        .with_context(|| format!("failed to bind RESP listener on {}", config.resp_address))?;
    background.push(tokio::spawn(resp::serve(resp_listener, state.clone())));

    let http_listener = TcpListener::bind(&config.http_address)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", config.http_address))?;
    info!("HTTP server listening on http://{}", http_listener.local_addr()?);

    axum::serve(
        http_listener,
        create_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the background tasks (cleanup sweep and RESP
/// accept loop) and lets the HTTP server drain.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in background {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
