//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → middleware/dispatch.rs (route decision, attach handler)
//!         ├─ response.rs (canned not-found / method-not-allowed)
//!         └─ handlers::execute_matched_handler (terminal stage)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::CannedResponse;
pub use server::HttpServer;
