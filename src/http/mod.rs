//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → /api/routes*  → api.rs (route table as JSON)
//!     → anything else → spa.rs
//!           → static file under the base, or
//!           → index document tagged with the resolved route
//! ```

pub mod api;
pub mod request;
pub mod server;
pub mod spa;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{reload_table, AppState, HttpServer, SharedTable};
pub use spa::X_ROUTE_NAME;
