//! Metrics collection and exposition.
//!
//! # Metrics
//! - `form_router_requests_total` (counter): requests by outcome and status
//! - `form_router_request_duration_seconds` (histogram): latency by outcome

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled form request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "form_router_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("form_router_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
