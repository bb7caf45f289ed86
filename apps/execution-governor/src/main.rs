//! Execution Governor Binary
//!
//! Starts the governance HTTP API in front of the pass-through matching engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin execution-governor
//! ```
//!
//! # Environment Variables
//!
//! - `GOVERNOR_CONFIG`: Path to the YAML config (default: config.yaml, if present)
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use execution_governor::config::{Config, load_config};
use execution_governor::infrastructure::events::LoggingEventPublisher;
use execution_governor::infrastructure::http::{AppState, create_router};
use execution_governor::infrastructure::ledger::InMemoryTransferLedger;
use execution_governor::infrastructure::matching::PassThroughMatchingEngine;
use execution_governor::observability::{MetricsConfig, init_metrics, init_tracing};
use execution_governor::ExecutionGovernor;
use tokio::net::TcpListener;
use tokio::signal;

/// Default configuration file.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = resolve_config()?;
    init_tracing(&config.observability.logging).context("failed to initialize tracing")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Execution Governor"
    );

    if config.observability.metrics.enabled {
        let addr = config.metrics_addr()?;
        init_metrics(&MetricsConfig::with_addr(addr)).context("failed to start metrics")?;
        tracing::info!(%addr, "Prometheus metrics exporter listening");
    }

    let state = config
        .governance
        .build_state()
        .context("invalid governance settings")?;

    let ledger = Arc::new(InMemoryTransferLedger::new());
    ledger
        .seed_escrow(config.governance.escrow_seed)
        .context("failed to seed escrow")?;

    let governor = Arc::new(ExecutionGovernor::new(
        state,
        ledger,
        Arc::new(PassThroughMatchingEngine::new()),
        Arc::new(LoggingEventPublisher),
    ));

    let app = create_router(AppState {
        governor,
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    let addr = config.server.http_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Execution Governor stopped");
    Ok(())
}

/// Load config from `GOVERNOR_CONFIG`, then `config.yaml`, then defaults.
fn resolve_config() -> anyhow::Result<Config> {
    if let Ok(path) = std::env::var("GOVERNOR_CONFIG") {
        return load_config(Some(&path)).with_context(|| format!("failed to load {path}"));
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(None).context("failed to load config.yaml");
    }
    Ok(Config::default())
}

/// Wait for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
