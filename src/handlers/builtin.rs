//! Handlers available to every deployment by name.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::handlers::Handler;
use crate::http::RequestIdExt;

/// Largest body the echo handler will buffer.
const ECHO_BODY_LIMIT: usize = 64 * 1024;

#[derive(Serialize)]
struct Echo {
    method: String,
    path: String,
    query: Option<String>,
    body: String,
}

pub fn all() -> Vec<Handler> {
    vec![
        Handler::new("hello", |_req| hello()),
        Handler::new("health", |_req| health()),
        Handler::new("echo", echo),
        Handler::new("request-id", request_id),
    ]
}

async fn hello() -> Response {
    "Hello, world!".into_response()
}

async fn health() -> Response {
    (StatusCode::OK, "OK").into_response()
}

async fn echo(request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, ECHO_BODY_LIMIT).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "Echo body rejected");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Body too large").into_response();
        }
    };

    Json(Echo {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        body,
    })
    .into_response()
}

async fn request_id(request: Request<Body>) -> Response {
    match request.request_id() {
        Some(id) => id.to_string().into_response(),
        None => (StatusCode::NOT_FOUND, "No request ID").into_response(),
    }
}
