//! Navigation history subsystem.
//!
//! # Data Flow
//! ```text
//! push("/results/42") / push(Named { "Results", {scanId: 42} })
//!     → navigator.rs (resolve target against the RouteTable)
//!     → web.rs (record entry, truncate forward entries)
//!     → current RouteMatch updated
//!
//! href(target)
//!     → navigator.rs (resolve to location)
//!     → base.rs (prefix base path)
//! ```

pub mod base;
pub mod navigator;
pub mod web;

pub use base::{create_href, normalize_base, strip_base};
pub use navigator::{NavigationError, NavigationTarget, Navigator, Resolved};
pub use web::WebHistory;
