//! Executable route handlers.
//!
//! # Data Flow
//! ```text
//! config routes[].handler (name)
//!     → HandlerRegistry (name → Handler)
//!     → SimpleRouter<Handler> (registered per method/path)
//!     → dispatch middleware attaches MatchedHandler<Handler>
//!     → execute_matched_handler (terminal stage) runs it
//! ```
//!
//! The router only carries `Handler` values around; running them is the
//! job of the terminal stage in this module.

pub mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::routing::MatchedHandler;

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync;

/// A named, cloneable async request handler.
#[derive(Clone)]
pub struct Handler {
    name: Arc<str>,
    call: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F, Fut>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(move |req: Request<Body>| f(req).boxed()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the handler.
    pub fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        (self.call)(request)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("name", &self.name).finish()
    }
}

/// Handlers addressable by name from configuration.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with [`builtin`] handlers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for handler in builtin::all() {
            registry.insert(handler);
        }
        registry
    }

    /// Add a handler, replacing any handler of the same name.
    pub fn insert(&mut self, handler: Handler) -> &mut Self {
        self.handlers.insert(handler.name().to_string(), handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Terminal stage: run the handler the dispatcher attached to the request.
pub async fn execute_matched_handler(request: Request<Body>) -> Response {
    let handler = request
        .extensions()
        .get::<MatchedHandler<Handler>>()
        .map(|matched| matched.handler().clone());

    match handler {
        Some(handler) => {
            tracing::trace!(handler = handler.name(), "Executing handler");
            handler.call(request).await
        }
        None => {
            tracing::error!(
                path = %request.uri().path(),
                "Request reached executor without a matched handler"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "No handler resolved").into_response()
        }
    }
}
