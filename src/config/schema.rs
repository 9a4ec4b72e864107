//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SPA host
//! and its route table. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

use crate::history::WebHistory;
use crate::routing::{Revision, RouteTable, RouteTableError, View};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Route table and history settings.
    pub router: RouterConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Build the route table this configuration describes.
    ///
    /// Explicit `[[router.routes]]` entries replace the built-in revision.
    pub fn route_table(&self) -> Result<RouteTable, RouteTableError> {
        if self.router.routes.is_empty() {
            return Ok(RouteTable::for_revision(self.router.revision));
        }
        self.router
            .routes
            .iter()
            .fold(RouteTable::builder(), |b, r| b.route(&r.path, &r.name, r.view))
            .build()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Directory holding the built client.
    pub static_dir: String,

    /// Document served for client-side routes.
    pub index_file: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            static_dir: "static".to_string(),
            index_file: "index.html".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Route table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Path prefix the application is mounted under.
    pub base_path: String,

    /// Built-in table used when no routes are listed.
    pub revision: Revision,

    /// Maximum retained history entries.
    pub max_history: usize,

    /// Explicit route list.
    pub routes: Vec<RouteConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            revision: Revision::Current,
            max_history: 50,
            routes: Vec::new(),
        }
    }
}

impl RouterConfig {
    /// History mounted at the configured base and capped at `max_history`.
    pub fn web_history(&self, initial_url: &str) -> WebHistory {
        WebHistory::new(&self.base_path, initial_url).with_max_entries(self.max_history)
    }
}

/// A single route declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. "/results/:scanId".
    pub path: String,

    /// Unique route name.
    pub name: String,

    /// View rendered for this route.
    pub view: View,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_current_revision() {
        let config = AppConfig::default();
        let table = config.route_table().unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.contains("Settings"));
    }

    #[test]
    fn test_explicit_routes_replace_revision() {
        let config: AppConfig = toml::from_str(
            r#"
            [router]
            revision = "initial"

            [[router.routes]]
            path = "/"
            name = "Home"
            view = "Home"

            [[router.routes]]
            path = "/scan/:scanId"
            name = "Results"
            view = "Results"
            "#,
        )
        .unwrap();
        let table = config.route_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("/scan/3").unwrap().name, "Results");
    }

    #[test]
    fn test_revision_only() {
        let config: AppConfig = toml::from_str("[router]\nrevision = \"initial\"\n").unwrap();
        assert_eq!(config.router.revision, Revision::Initial);
        assert!(!config.route_table().unwrap().contains("Settings"));
        assert_eq!(config.server.bind_address, "0.0.0.0:5000");
    }

    #[test]
    fn test_web_history_uses_router_settings() {
        let config: AppConfig =
            toml::from_str("[router]\nbase_path = \"/ui\"\nmax_history = 2\n").unwrap();
        let mut history = config.router.web_history("/ui/results/1");
        assert_eq!(history.base(), "/ui");
        assert_eq!(history.location(), "/results/1");

        history.push("/results/2");
        history.push("/settings");
        assert_eq!(history.len(), 2);
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.location(), "/results/2");
    }
}
