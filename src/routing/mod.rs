//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     get/post/.../any/match_methods
//!     → router.rs (register primitive)
//!     → table.rs (method → exact path → handler)
//!
//! Incoming Request (method, path)
//!     → method.rs (normalize method, reject unknown)
//!     → table.rs (exact path lookup)
//!     → MethodNotAllowed | NotFound | Forward(handler)
//!
//! Reload (optional):
//!     new SimpleRouter → shared.rs (atomic snapshot swap)
//! ```
//!
//! # Design Decisions
//! - Exact string matching only, no patterns
//! - Routes immutable while serving; reload swaps whole snapshots
//! - Deterministic: same input always yields the same outcome

pub mod method;
pub mod router;
pub mod shared;
pub mod table;

pub use method::RouteMethod;
pub use router::{Dispatch, Fallback, MatchedHandler, SimpleRouter, REQUEST_HANDLER_KEY};
pub use shared::SharedRouter;
pub use table::RouteTable;
