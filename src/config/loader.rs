//! Configuration loading from disk and route table construction.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{to_canned, validate_config, ValidationError};
use crate::error::RouterError;
use crate::handlers::{Handler, HandlerRegistry};
use crate::routing::SimpleRouter;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("route '{path}': unknown handler '{handler}'")]
    UnknownHandler { path: String, handler: String },

    #[error("Route registration failed: {0}")]
    Route(#[from] RouterError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Build a route table from configuration, resolving handler names.
///
/// Routes are registered in file order, so a later entry for the same
/// (method, path) replaces an earlier one.
pub fn build_router(
    config: &RouterConfig,
    registry: &HandlerRegistry,
) -> Result<SimpleRouter<Handler>, ConfigError> {
    let mut router = SimpleRouter::new();

    if let Some(response) = &config.fallbacks.not_found {
        let canned = to_canned("not_found", response)
            .map_err(|e| ConfigError::Validation(vec![e]))?;
        router.set_not_found_response(canned);
    }
    if let Some(response) = &config.fallbacks.method_not_allowed {
        let canned = to_canned("method_not_allowed", response)
            .map_err(|e| ConfigError::Validation(vec![e]))?;
        router.set_method_not_allowed_response(canned);
    }

    for route in &config.routes {
        let handler = registry
            .get(&route.handler)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownHandler {
                path: route.path.clone(),
                handler: route.handler.clone(),
            })?;

        if route.is_any() {
            router.any(route.path.clone(), handler);
        } else {
            router.match_methods(&route.methods, route.path.clone(), handler)?;
        }
    }

    tracing::debug!(routes = router.table().len(), "Route table built");
    Ok(router)
}
