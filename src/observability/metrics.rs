//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatch decisions by outcome, method
//! - `router_dispatch_duration_seconds` (histogram): time spent deciding
//! - `router_routes` (gauge): entries in the active route table

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RouteMethod;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one dispatch decision.
///
/// Methods outside the routable set are bucketed as `OTHER` to bound label
/// cardinality.
pub fn record_dispatch(outcome: &'static str, method: &str, start: Instant) {
    let method = match method.parse::<RouteMethod>() {
        Ok(m) => m.as_str(),
        Err(_) => "OTHER",
    };
    ::metrics::counter!("router_dispatch_total", "outcome" => outcome, "method" => method)
        .increment(1);
    ::metrics::histogram!("router_dispatch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of the route table currently being served.
pub fn record_route_count(routes: usize) {
    ::metrics::gauge!("router_routes").set(routes as f64);
}
