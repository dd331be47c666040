//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by endpoint, status
//! - `api_request_duration_seconds` (histogram): latency by endpoint
//! - `digests_computed_total` (counter): digest computations
//! - `anchors_total` (counter): anchor transactions by outcome
//! - `rpc_healthy` (gauge): 1=reachable, 0=unreachable

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record an API request with its status and latency.
pub fn record_api_request(endpoint: &str, status: u16, start: Instant) {
    counter!(
        "api_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("api_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a digest computation.
pub fn record_digest() {
    counter!("digests_computed_total").increment(1);
}

/// Record an anchor transaction outcome.
pub fn record_anchor(success: bool) {
    let outcome = if success { "confirmed" } else { "failed" };
    counter!("anchors_total", "outcome" => outcome).increment(1);
}

/// Record blockchain RPC reachability.
pub fn record_rpc_health(healthy: bool) {
    gauge!("rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}
