//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, addresses)
//! - Reject route methods outside the routable set
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

use crate::config::schema::{ResponseConfig, RouteConfig, RouterConfig, ANY_METHOD};
use crate::http::response::CannedResponse;
use crate::routing::RouteMethod;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("fallbacks.{fallback}: invalid status code {status}")]
    InvalidStatus { fallback: &'static str, status: u16 },

    #[error("fallbacks.{fallback}: invalid header '{name}'")]
    InvalidHeader { fallback: &'static str, name: String },

    #[error("route '{path}': no methods given")]
    EmptyMethods { path: String },

    #[error("route '{path}': the method [{method}] is unknown or not authorized")]
    InvalidMethod { path: String, method: String },

    #[error("route '{path}': path must start with '/'")]
    InvalidPath { path: String },

    #[error("route '{path}': handler name is empty")]
    EmptyHandler { path: String },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let fallbacks = [
        ("not_found", &config.fallbacks.not_found),
        ("method_not_allowed", &config.fallbacks.method_not_allowed),
    ];
    for (name, response) in fallbacks {
        if let Some(response) = response {
            if let Err(e) = to_canned(name, response) {
                errors.push(e);
            }
        }
    }

    for route in &config.routes {
        validate_route(route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    if !route.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath {
            path: route.path.clone(),
        });
    }

    if route.handler.trim().is_empty() {
        errors.push(ValidationError::EmptyHandler {
            path: route.path.clone(),
        });
    }

    if route.methods.is_empty() {
        errors.push(ValidationError::EmptyMethods {
            path: route.path.clone(),
        });
    }

    for method in &route.methods {
        if method.eq_ignore_ascii_case(ANY_METHOD) {
            continue;
        }
        if method.parse::<RouteMethod>().is_err() {
            errors.push(ValidationError::InvalidMethod {
                path: route.path.clone(),
                method: method.to_ascii_uppercase(),
            });
        }
    }
}

/// Build the canned response a fallback entry describes.
pub fn to_canned(
    fallback: &'static str,
    response: &ResponseConfig,
) -> Result<CannedResponse, ValidationError> {
    let status = StatusCode::from_u16(response.status).map_err(|_| ValidationError::InvalidStatus {
        fallback,
        status: response.status,
    })?;

    let header = |name: &str, value: &str| -> Result<(HeaderName, HeaderValue), ValidationError> {
        let invalid = || ValidationError::InvalidHeader {
            fallback,
            name: name.to_string(),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        Ok((name, value))
    };

    let (name, value) = header("content-type", &response.content_type)?;
    let mut canned = CannedResponse::new(status)
        .with_header(name, value)
        .with_body(response.body.clone());

    for (name, value) in &response.headers {
        let (name, value) = header(name, value)?;
        canned = canned.with_header(name, value);
    }

    Ok(canned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(methods: &[&str], path: &str) -> RouteConfig {
        RouteConfig {
            methods: methods.iter().map(|m| m.to_string()).collect(),
            path: path.to_string(),
            handler: "hello".to_string(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.fallbacks.not_found = Some(ResponseConfig::new(42, "?"));
        config.routes.push(route(&["get", "trace"], "hello"));
        config.routes.push(route(&[], "/empty"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "nowhere".into(),
                },
                ValidationError::ZeroTimeout,
                ValidationError::InvalidStatus { fallback: "not_found", status: 42 },
                ValidationError::InvalidPath { path: "hello".into() },
                ValidationError::InvalidMethod { path: "hello".into(), method: "TRACE".into() },
                ValidationError::EmptyMethods { path: "/empty".into() },
            ]
        );
    }

    #[test]
    fn test_any_is_accepted() {
        let mut config = RouterConfig::default();
        config.routes.push(route(&["any"], "/x"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_to_canned_applies_headers() {
        let mut response = ResponseConfig::new(404, "{}");
        response.content_type = "application/json".into();
        response.headers.insert("cache-control".into(), "no-store".into());

        let canned = to_canned("not_found", &response).unwrap();
        assert_eq!(canned.status(), StatusCode::NOT_FOUND);
        assert_eq!(canned.headers()["content-type"], "application/json");
        assert_eq!(canned.headers()["cache-control"], "no-store");
        assert_eq!(canned.body().as_ref(), b"{}");
    }

    #[test]
    fn test_to_canned_rejects_bad_header() {
        let mut response = ResponseConfig::new(404, "");
        response.headers.insert("bad header".into(), "x".into());

        assert_eq!(
            to_canned("not_found", &response).unwrap_err(),
            ValidationError::InvalidHeader { fallback: "not_found", name: "bad header".into() }
        );
    }
}
