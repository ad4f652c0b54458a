//! Route registration and per-request dispatch.
//!
//! # Responsibilities
//! - Fluent registration of exact (method, path) routes
//! - Hold the not-found / method-not-allowed fallback responses
//! - Decide, per request: method-not-allowed, not-found, or forward
//! - Attach the matched handler to the request before forwarding
//!
//! # Design Decisions
//! - Handlers are opaque: stored and attached, never invoked here
//! - Read-only during dispatch (share via `Arc`, no locks)
//! - An unset fallback is an explicit error, never an empty response

use std::fmt;
use std::future::Future;
use std::time::Instant;

use axum::http::Request;
use axum::response::{IntoResponse, Response};

use crate::error::{RouterError, RouterResult};
use crate::http::response::CannedResponse;
use crate::observability::metrics;
use crate::routing::{RouteMethod, RouteTable};

/// Attribute name under which the matched handler travels with the request.
pub const REQUEST_HANDLER_KEY: &str = "request-handler";

/// Request extension carrying the handler resolved by the dispatcher.
///
/// Downstream stages read it with
/// `request.extensions().get::<MatchedHandler<H>>()`.
#[derive(Debug, Clone)]
pub struct MatchedHandler<H>(pub H);

impl<H> MatchedHandler<H> {
    pub const KEY: &'static str = REQUEST_HANDLER_KEY;

    pub fn handler(&self) -> &H {
        &self.0
    }

    pub fn into_inner(self) -> H {
        self.0
    }
}

/// Which canned response a dispatch outcome needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    NotFound,
    MethodNotAllowed,
}

impl Fallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fallback::NotFound => "not-found",
            Fallback::MethodNotAllowed => "method-not-allowed",
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of matching a (method, path) pair against the table.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch<'a, H> {
    /// Method is outside the routable set.
    MethodNotAllowed,
    /// Method is routable but nothing is registered at this exact path.
    NotFound,
    /// Exact match; forward with this handler.
    Forward(&'a H),
}

impl<H> Dispatch<'_, H> {
    /// Label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Dispatch::MethodNotAllowed => Fallback::MethodNotAllowed.as_str(),
            Dispatch::NotFound => Fallback::NotFound.as_str(),
            Dispatch::Forward(_) => "forward",
        }
    }
}

/// Exact-match router usable as a middleware stage.
#[derive(Debug, Clone)]
pub struct SimpleRouter<H> {
    table: RouteTable<H>,
    not_found: Option<CannedResponse>,
    method_not_allowed: Option<CannedResponse>,
}

impl<H> SimpleRouter<H> {
    /// Create a router with no routes and no fallbacks configured.
    pub fn new() -> Self {
        Self::with_fallbacks(None, None)
    }

    pub fn with_fallbacks(
        not_found: Option<CannedResponse>,
        method_not_allowed: Option<CannedResponse>,
    ) -> Self {
        Self {
            table: RouteTable::new(),
            not_found,
            method_not_allowed,
        }
    }

    pub fn not_found_response(&self) -> Option<&CannedResponse> {
        self.not_found.as_ref()
    }

    pub fn set_not_found_response(&mut self, response: CannedResponse) -> &mut Self {
        self.not_found = Some(response);
        self
    }

    pub fn method_not_allowed_response(&self) -> Option<&CannedResponse> {
        self.method_not_allowed.as_ref()
    }

    pub fn set_method_not_allowed_response(&mut self, response: CannedResponse) -> &mut Self {
        self.method_not_allowed = Some(response);
        self
    }

    /// Register `handler` for exactly `(method, path)`, replacing any previous one.
    pub fn register(&mut self, method: RouteMethod, path: impl Into<String>, handler: H) -> &mut Self {
        let path = path.into();
        if self.table.insert(method, path.clone(), handler).is_some() {
            tracing::debug!(method = %method, path = %path, "Route handler replaced");
        }
        self
    }

    pub fn get(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Get, path, handler)
    }

    pub fn post(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Post, path, handler)
    }

    pub fn put(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Put, path, handler)
    }

    pub fn delete(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Delete, path, handler)
    }

    pub fn options(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Options, path, handler)
    }

    pub fn patch(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Patch, path, handler)
    }

    pub fn head(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        self.register(RouteMethod::Head, path, handler)
    }

    /// The underlying table, for inspection.
    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    /// Match a method name and raw path against the table.
    pub fn decide(&self, method: &str, path: &str) -> Dispatch<'_, H> {
        let Ok(method) = method.parse::<RouteMethod>() else {
            return Dispatch::MethodNotAllowed;
        };
        match self.table.get(method, path) {
            Some(handler) => Dispatch::Forward(handler),
            None => Dispatch::NotFound,
        }
    }

    /// The configured response for a fallback outcome.
    pub fn fallback(&self, kind: Fallback) -> RouterResult<&CannedResponse> {
        let response = match kind {
            Fallback::NotFound => self.not_found.as_ref(),
            Fallback::MethodNotAllowed => self.method_not_allowed.as_ref(),
        };
        response.ok_or(RouterError::PreconditionNotMet(kind))
    }

    /// Check that both fallbacks are configured, so dispatch can never hit
    /// `PreconditionNotMet`.
    pub fn ensure_fallbacks(&self) -> RouterResult<()> {
        self.fallback(Fallback::NotFound)?;
        self.fallback(Fallback::MethodNotAllowed)?;
        Ok(())
    }
}

impl<H: Clone> SimpleRouter<H> {
    /// Register the same handler under every routable method.
    pub fn any(&mut self, path: impl Into<String>, handler: H) -> &mut Self {
        let path = path.into();
        for method in RouteMethod::ALL {
            self.register(method, path.clone(), handler.clone());
        }
        self
    }

    /// Register `handler` under each named method, in order.
    ///
    /// Stops at the first unknown method. Methods before it stay registered.
    pub fn match_methods<I, S>(
        &mut self,
        methods: I,
        path: impl Into<String>,
        handler: H,
    ) -> RouterResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let methods: Vec<S> = methods.into_iter().collect();
        if methods.is_empty() {
            return Err(RouterError::EmptyMethodList);
        }

        let path = path.into();
        for method in &methods {
            let method: RouteMethod = method.as_ref().parse()?;
            self.register(method, path.clone(), handler.clone());
        }
        Ok(self)
    }
}

impl<H> SimpleRouter<H>
where
    H: Clone + Send + Sync + 'static,
{
    /// Run the dispatch decision for `request` and either answer with a
    /// fallback or hand the request, carrying [`MatchedHandler`], to `next`.
    ///
    /// The response from `next` is returned as is.
    pub async fn process<B, F, Fut>(&self, mut request: Request<B>, next: F) -> RouterResult<Response>
    where
        F: FnOnce(Request<B>) -> Fut,
        Fut: Future<Output = Response>,
    {
        let start_time = Instant::now();
        let method = request.method().as_str().to_ascii_uppercase();
        let path = request.uri().path().to_string();

        let decision = self.decide(&method, &path);
        let outcome = decision.outcome();
        metrics::record_dispatch(outcome, &method, start_time);

        let fallback = match decision {
            Dispatch::Forward(handler) => {
                tracing::debug!(method = %method, path = %path, "Route matched");
                request.extensions_mut().insert(MatchedHandler(handler.clone()));
                return Ok(next(request).await);
            }
            Dispatch::NotFound => {
                tracing::debug!(method = %method, path = %path, "No route registered");
                Fallback::NotFound
            }
            Dispatch::MethodNotAllowed => {
                tracing::warn!(method = %method, path = %path, "Method not allowed");
                Fallback::MethodNotAllowed
            }
        };

        match self.fallback(fallback) {
            Ok(response) => Ok(response.clone().into_response()),
            Err(e) => {
                tracing::error!(method = %method, path = %path, error = %e, "Fallback response missing");
                Err(e)
            }
        }
    }
}

impl<H> Default for SimpleRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}
