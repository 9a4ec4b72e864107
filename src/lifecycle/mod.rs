//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Metrics → Server + route table → Watcher → Listener
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Ctrl+C → broadcast → stop accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start, watch_route_table, StartupError};
