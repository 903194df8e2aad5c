//! Warscry API server binary.
//!
//! Wires the snapshot store, the remote source, the refresh scheduler and
//! the HTTP API together.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `warscry-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the HTTP source for the two remote files
//! 4. Fetch, validate and install the initial dataset (fatal on failure)
//! 5. Spawn the refresh scheduler, if enabled
//! 6. Serve the API until Ctrl-C
//! 7. Stop the scheduler and exit

mod error;

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use warscry_api::{AppState, ServerConfig, ServiceInfo};
use warscry_core::config::WarscryConfig;
use warscry_core::pipeline;
use warscry_core::refresh::RefreshScheduler;
use warscry_core::source::HttpSource;
use warscry_core::store::SnapshotStore;

use crate::error::ServerError;

const CONFIG_PATH: &str = "warscry-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the initial dataset
/// cannot be loaded, or the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration.
    let config_path = Path::new(CONFIG_PATH);
    let from_file = config_path.exists();
    let config = if from_file {
        WarscryConfig::from_file(config_path)?
    } else {
        WarscryConfig::from_env()?
    };

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "warscry-server starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Remote source.
    let source = Arc::new(HttpSource::new(
        config.sources.fighters_url.clone(),
        config.sources.abilities_url.clone(),
        config.sources.request_timeout(),
    )?);
    info!(
        fighters_url = %config.sources.fighters_url,
        abilities_url = %config.sources.abilities_url,
        "Remote source configured"
    );

    // 4. Mandatory startup load.
    let store = Arc::new(SnapshotStore::new());
    let dataset = pipeline::load(source.as_ref())
        .await
        .inspect_err(|e| error!(error = %e, "Startup load failed, refusing to serve"))?;
    store.install(dataset);
    let (fighters, abilities) = store.counts();
    info!(fighters, abilities, "Initial dataset installed");

    // 5. Background refresh.
    let refresh = if config.refresh.enabled {
        let handle = RefreshScheduler::new(
            Arc::clone(&source),
            Arc::clone(&store),
            config.refresh.poll_interval(),
        )
        .spawn();
        info!(
            poll_interval_secs = config.refresh.poll_interval_secs,
            "Refresh scheduler started"
        );
        Some(handle)
    } else {
        info!("Refresh scheduler disabled");
        None
    };

    // 6. Serve until Ctrl-C.
    let state = AppState::new(Arc::clone(&store)).with_info(ServiceInfo {
        version: config.api.version.clone(),
        docs_url: config.api.docs_url.clone(),
    });
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let served = warscry_api::start_server(&server_config, Arc::new(state), shutdown_signal()).await;

    // 7. Stop the scheduler even if serving failed.
    if let Some(handle) = refresh {
        handle.stop().await?;
    }
    served?;

    info!("warscry-server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl-C. If the signal handler cannot be installed, never
/// resolve.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
