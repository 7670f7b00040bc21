//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Count routing decisions by outcome
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `i18n_decisions_total` (counter): routing decisions by `decision`
//!   (`pass_through`, `not_found`, `redirect`, `fallback_redirect`)
//!
//! # Design Decisions
//! - Recording without an installed recorder is a no-op, so tests need no setup

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const DECISIONS_TOTAL: &str = "i18n_decisions_total";

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one routing decision.
pub fn record_decision(decision: &'static str) {
    metrics::counter!(DECISIONS_TOTAL, "decision" => decision).increment(1);
}
