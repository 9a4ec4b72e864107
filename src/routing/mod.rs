//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location ("/target/example.com/42?tab=urls")
//!     → location.rs (split path, query, hash)
//!     → table.rs (walk descriptors in order)
//!     → pattern.rs (segment match, extract named segments)
//!     → Return: RouteMatch or no match
//!
//! Table Construction (at startup or reload):
//!     (path, name, view)[]
//!     → Compile patterns
//!     → Reject duplicate names and duplicate shapes
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Tables are built once and never mutated
//! - No regex in the lookup path
//! - Deterministic: the same location always resolves to the same route
//! - Most specific pattern wins when several match

pub mod descriptor;
pub mod location;
pub mod pattern;
pub mod revision;
pub mod table;

pub use descriptor::{RouteDescriptor, RouteSummary, View};
pub use location::{Location, Params, RouteMatch};
pub use pattern::{PathPattern, PatternError};
pub use revision::Revision;
pub use table::{RouteTable, RouteTableBuilder, RouteTableError};
