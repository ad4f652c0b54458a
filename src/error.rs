//! Error types for route registration and dispatch.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::Fallback;

/// Errors raised by the route table and dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A method name outside the routable set was used at registration time.
    #[error("The method [{method}] is unknown or not authorized.")]
    InvalidMethod { method: String },

    /// Bulk registration was called without any method.
    #[error("At least one method is required to register a route")]
    EmptyMethodList,

    /// A fallback outcome was reached but no response was configured for it.
    #[error("Precondition not met: no {0} response configured")]
    PreconditionNotMet(Fallback),
}

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// Only reached when a router was served with a fallback left unset.
impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Router misconfigured").into_response()
    }
}
