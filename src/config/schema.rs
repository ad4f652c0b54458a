//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML and every
//! field has a default, so an empty file is a valid configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http::response::TEXT_PLAIN;

/// Root configuration for the router service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Canned responses for unmatched requests.
    pub fallbacks: FallbackConfig,

    /// Exact (methods, path) → handler routes.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Fallback responses.
///
/// Omitted keys fall back to the built-in 404 / 405 responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub not_found: Option<ResponseConfig>,
    pub method_not_allowed: Option<ResponseConfig>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            not_found: Some(ResponseConfig::new(404, "Not Found")),
            method_not_allowed: Some(ResponseConfig::new(405, "Method Not Allowed")),
        }
    }
}

/// A canned response described in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponseConfig {
    /// HTTP status code.
    pub status: u16,

    /// Response body.
    #[serde(default)]
    pub body: String,

    /// Value of the Content-Type header.
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Extra response headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ResponseConfig {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: default_content_type(),
            headers: BTreeMap::new(),
        }
    }
}

fn default_content_type() -> String {
    TEXT_PLAIN.to_string()
}

/// A route binding one exact path to a named handler.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Methods to register under. `"ANY"` expands to every routable method.
    pub methods: Vec<String>,

    /// Exact request path.
    pub path: String,

    /// Name of the handler in the handler registry.
    pub handler: String,
}

impl RouteConfig {
    /// True if the route should be registered under every method.
    pub fn is_any(&self) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(ANY_METHOD))
    }
}

/// Pseudo-method selecting every routable method.
pub const ANY_METHOD: &str = "ANY";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.fallbacks.not_found.unwrap().status, 404);
        assert_eq!(config.fallbacks.method_not_allowed.unwrap().status, 405);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_routes_and_fallbacks() {
        let config: RouterConfig = toml::from_str(
            r#"
            [fallbacks.not_found]
            status = 404
            body = '{"error":"not found"}'
            content_type = "application/json"

            [[routes]]
            methods = ["get", "HEAD"]
            path = "/hello"
            handler = "hello"

            [[routes]]
            methods = ["any"]
            path = "/echo"
            handler = "echo"
            "#,
        )
        .unwrap();

        let not_found = config.fallbacks.not_found.unwrap();
        assert_eq!(not_found.content_type, "application/json");
        assert_eq!(config.fallbacks.method_not_allowed.unwrap().status, 405);

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].methods, vec!["get", "HEAD"]);
        assert!(!config.routes[0].is_any());
        assert!(config.routes[1].is_any());
    }
}
