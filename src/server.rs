//! Service startup and shutdown wiring.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::{self, AppState};
use crate::core::alerts::AlertLedger;
use crate::core::config::Config;
use crate::core::telemetry::{GpuBackend, SnapshotService};
use crate::platform;

/// Acquire the backend and storage, then serve until ctrl-c/SIGTERM.
///
/// Backend initialization failure is the only condition that prevents the
/// service from serving traffic; everything later degrades per field.
pub async fn run(config: Config) -> Result<()> {
    let backend = platform::init_backend(&config)
        .context("initializing GPU backend")?;

    let device = backend.device_name().await.unwrap_or_else(|| "unknown device".to_string());
    log::info!(
        "using {} backend for device {} ({})",
        backend.kind(),
        config.device_index,
        device
    );

    let ledger = AlertLedger::open(&config.db_path)
        .with_context(|| format!("opening alert database at {}", config.db_path.display()))?;

    let state = AppState {
        snapshot: Arc::new(SnapshotService::new(backend)),
        ledger: Arc::new(ledger),
    };

    let app = api::router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding to {}", config.bind_addr))?;

    log::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("gpumon stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => log::error!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { log::info!("received Ctrl+C, shutting down"); }
        _ = terminate => { log::info!("received SIGTERM, shutting down"); }
    }
}
