//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the server and bind the listener
//! - Watch the config file and swap in rebuilt route tables
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound last so traffic only arrives when ready

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use notify::RecommendedWatcher;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ConfigWatcher};
use crate::http::{reload_table, HttpServer, SharedTable};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_ctrl_c_handler;
use crate::observability::metrics;
use crate::routing::RouteTableError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config watcher: {0}")]
    Watch(#[from] notify::Error),

    #[error("server: {0}")]
    Serve(#[from] std::io::Error),
}

/// Rebuild `table` whenever the config file at `path` changes.
///
/// Must be called inside a tokio runtime. The reload task ends when the
/// returned watcher is dropped.
pub fn watch_route_table(path: &Path, table: SharedTable) -> Result<RecommendedWatcher, notify::Error> {
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let handle = watcher.run()?;
    tokio::spawn(async move {
        while let Some(next) = updates.recv().await {
            if let Err(e) = reload_table(&table, &next) {
                tracing::error!(error = %e, "Rejected reloaded route table");
            }
        }
    });
    Ok(handle)
}

/// Run the SPA host until Ctrl+C.
///
/// When `config_path` is given, edits to that file reload the route table.
pub async fn start(config: AppConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(&config)?;

    // Held for the lifetime of the server; dropping it stops the watch.
    let _watcher = match config_path {
        Some(path) => Some(watch_route_table(&path, server.table())?),
        None => None,
    };

    let shutdown = Shutdown::new();
    spawn_ctrl_c_handler(shutdown.clone());

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.server.bind_address.clone(),
            source,
        })?;

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
