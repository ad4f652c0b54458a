//! Exact-match HTTP route dispatcher.
//!
//! Registers handlers under (method, exact path) pairs and, as a middleware
//! stage, either answers with a canned not-found / method-not-allowed
//! response or forwards the request with the matched handler attached.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use error::{RouterError, RouterResult};
pub use handlers::{Handler, HandlerRegistry};
pub use http::{CannedResponse, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{Dispatch, MatchedHandler, RouteMethod, SharedRouter, SimpleRouter, REQUEST_HANDLER_KEY};
