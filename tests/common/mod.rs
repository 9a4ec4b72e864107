//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use domscout_router::config::AppConfig;
use domscout_router::http::HttpServer;
use domscout_router::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const INDEX_HTML: &str = "<!doctype html><div id=\"app\"></div>";
pub const APP_JS: &str = "console.log('domscout');";

/// Lay out a built client: index.html plus one asset.
pub fn static_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    fs::create_dir(dir.path().join("js")).unwrap();
    fs::write(dir.path().join("js").join("app.js"), APP_JS).unwrap();
    dir
}

/// A running server and the handles that keep it alive.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub server_table: domscout_router::http::SharedTable,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the SPA host on an ephemeral port serving `static_dir`.
pub async fn start_server(mut config: AppConfig, static_dir: &Path) -> TestServer {
    config.server.static_dir = static_dir.to_string_lossy().into_owned();

    let server = HttpServer::new(&config).unwrap();
    let server_table = server.table();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer {
        addr,
        shutdown,
        server_table,
    }
}
