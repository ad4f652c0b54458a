//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app: dispatch middleware in front of the handler executor
//! - Wire up middleware (tracing, timeout, request ID)
//! - Swap in rebuilt route tables when configuration changes
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{build_router, ConfigError, RouterConfig};
use crate::handlers::{execute_matched_handler, Handler, HandlerRegistry};
use crate::http::middleware::dispatch_middleware;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::routing::{SharedRouter, SimpleRouter};

/// HTTP server fronted by the exact-match dispatcher.
pub struct HttpServer {
    app: Router,
    config: RouterConfig,
    routes: Arc<SharedRouter<Handler>>,
    registry: HandlerRegistry,
}

impl HttpServer {
    /// Build the route table from `config` and create the server.
    pub fn new(config: RouterConfig, registry: HandlerRegistry) -> Result<Self, ConfigError> {
        let router = build_router(&config, &registry)?;
        Ok(Self::with_router(config, registry, router))
    }

    /// Create the server around an already registered router.
    ///
    /// `registry` is only used to rebuild routes on config reload.
    pub fn with_router(
        config: RouterConfig,
        registry: HandlerRegistry,
        router: SimpleRouter<Handler>,
    ) -> Self {
        if let Err(e) = router.ensure_fallbacks() {
            tracing::warn!(error = %e, "Serving with an unset fallback response");
        }
        metrics::record_route_count(router.table().len());

        let routes = Arc::new(SharedRouter::new(router));
        let app = Self::build_app(&config, routes.clone());
        Self {
            app,
            config,
            routes,
            registry,
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &RouterConfig, routes: Arc<SharedRouter<Handler>>) -> Router {
        Router::new()
            .fallback(execute_matched_handler)
            .layer(middleware::from_fn_with_state(routes, dispatch_middleware::<Handler>))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The Axum app, e.g. for driving requests in tests.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Handle to the live route table.
    pub fn routes(&self) -> Arc<SharedRouter<Handler>> {
        self.routes.clone()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Rebuild routes and fallbacks from `config` and publish them.
    ///
    /// On error the current routes stay in place.
    pub fn reload(&self, config: &RouterConfig) -> Result<(), ConfigError> {
        apply_routes(&self.routes, &self.registry, config)
    }

    /// Serve on `listener`, applying config updates, until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.snapshot().table().len(),
            "HTTP server starting"
        );

        let routes = self.routes.clone();
        let registry = self.registry.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = apply_routes(&routes, &registry, &config) {
                    tracing::error!(error = %e, "Rejected config update, keeping current routes");
                }
            }
        });

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Listener and timeout changes are ignored here; they need a restart.
fn apply_routes(
    routes: &SharedRouter<Handler>,
    registry: &HandlerRegistry,
    config: &RouterConfig,
) -> Result<(), ConfigError> {
    let router = build_router(config, registry)?;
    metrics::record_route_count(router.table().len());
    routes.replace(router);
    Ok(())
}
