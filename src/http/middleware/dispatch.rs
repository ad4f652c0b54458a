//! Route dispatch as an axum middleware stage.
//!
//! Plug in with `axum::middleware::from_fn_with_state(shared, dispatch_middleware::<H>)`.
//! The stage after it finds the matched handler in the request extensions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::error::RouterError;
use crate::routing::SharedRouter;

pub async fn dispatch_middleware<H>(
    State(router): State<Arc<SharedRouter<H>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, RouterError>
where
    H: Clone + Send + Sync + 'static,
{
    let router = router.snapshot();
    router.process(request, |req| next.run(req)).await
}
