//! Metrics collection and exposition.
//!
//! # Metrics
//! - `spa_requests_total` (counter): requests by kind and status
//! - `spa_request_duration_seconds` (histogram): latency distribution
//! - `spa_route_resolutions_total` (counter): fallback requests by resolved route

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Label used when a location matches no route.
pub const UNMATCHED: &str = "unmatched";

/// Start the Prometheus scrape endpoint. Must be called inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished request.
pub fn record_request(kind: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "spa_requests_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("spa_request_duration_seconds", "kind" => kind)
        .record(start.elapsed().as_secs_f64());
}

/// Record which route a client-side location resolved to.
pub fn record_resolution(route: Option<&str>) {
    let route = route.unwrap_or(UNMATCHED).to_string();
    metrics::counter!("spa_route_resolutions_total", "route" => route).increment(1);
}
