//! DomScout client route table, history navigator and SPA host.

pub mod config;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use history::{NavigationTarget, Navigator, WebHistory};
pub use http::HttpServer;
pub use routing::{Params, Revision, RouteMatch, RouteTable, View};
