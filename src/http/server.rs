//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the route table API and the SPA fallback
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hold the current route table behind an atomic swap
//! - Serve until the shutdown signal fires

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::history::normalize_base;
use crate::http::api;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::spa::spa_handler;
use crate::routing::{RouteTable, RouteTableError};

/// Shared handle to the live route table.
pub type SharedTable = Arc<ArcSwap<RouteTable>>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: SharedTable,
    /// Normalized base path ("" when mounted at the root).
    pub base: Arc<str>,
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
}

/// HTTP server hosting the single-page application.
pub struct HttpServer {
    router: Router,
    table: SharedTable,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &AppConfig) -> Result<Self, RouteTableError> {
        let table: SharedTable = Arc::new(ArcSwap::from_pointee(config.route_table()?));
        let static_dir = PathBuf::from(&config.server.static_dir);

        let state = AppState {
            table: table.clone(),
            base: normalize_base(&config.router.base_path).into(),
            index_file: static_dir.join(&config.server.index_file),
            static_dir,
        };

        tracing::info!(
            base = %state.base,
            static_dir = ?state.static_dir,
            routes = table.load().len(),
            "Route table loaded"
        );

        let router = Self::build_router(config, state);
        Ok(Self { router, table })
    }

    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/routes", get(api::list_routes))
            .route("/api/routes/resolve", get(api::resolve_route))
            .fallback(spa_handler)
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.server.request_timeout_secs),
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %req.request_id(),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Handle used to swap in a new route table.
    pub fn table(&self) -> SharedTable {
        self.table.clone()
    }

    /// The assembled Axum router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Replace the live table with one built from `config`.
///
/// On failure the current table stays in place.
pub fn reload_table(table: &SharedTable, config: &AppConfig) -> Result<(), RouteTableError> {
    let next = config.route_table()?;
    tracing::info!(routes = next.len(), "Route table reloaded");
    table.store(Arc::new(next));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Revision;

    #[test]
    fn test_reload_swaps_table() {
        let mut config = AppConfig::default();
        config.router.revision = Revision::Initial;
        let server = HttpServer::new(&config).unwrap();
        let table = server.table();
        assert!(table.load().resolve("/settings").is_none());

        config.router.revision = Revision::Current;
        reload_table(&table, &config).unwrap();
        assert_eq!(table.load().resolve("/settings").unwrap().name, "Settings");
    }

    #[test]
    fn test_failed_reload_keeps_table() {
        let config = AppConfig::default();
        let server = HttpServer::new(&config).unwrap();
        let table = server.table();

        let mut broken = config.clone();
        broken.router.routes = vec![crate::config::RouteConfig {
            path: "no-slash".into(),
            name: "Bad".into(),
            view: crate::routing::View::Home,
        }];
        assert!(reload_table(&table, &broken).is_err());
        assert_eq!(table.load().len(), 4);
    }
}
