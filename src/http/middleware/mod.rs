//! Axum middleware stages.

pub mod dispatch;

pub use dispatch::dispatch_middleware;
