//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docs_gateway_decisions_total` (counter): policy decisions by outcome
//! - `docs_gateway_upstream_responses_total` (counter): renderer responses by status
//! - `docs_gateway_upstream_duration_seconds` (histogram): renderer latency
//!
//! Recording is a no-op until a recorder is installed, so tests and the CLI
//! never need to initialise anything.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::Outcome;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_decision(outcome: Outcome) {
    ::metrics::counter!("docs_gateway_decisions_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_upstream(status: u16, start: Instant) {
    ::metrics::counter!("docs_gateway_upstream_responses_total", "status" => status.to_string())
        .increment(1);
    ::metrics::histogram!("docs_gateway_upstream_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}
