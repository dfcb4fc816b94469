//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echo_requests_total` (counter): requests by outcome and status
//! - `echo_request_duration_seconds` (histogram): handler latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Outcome label of a handled echo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Formatter ran and produced a response.
    Echoed,
    /// Guarded merge refused the body.
    Refused,
    /// Formatter field was not invocable.
    Fault,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Echoed => "echoed",
            Outcome::Refused => "refused",
            Outcome::Fault => "fault",
        }
    }
}

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(outcome: Outcome, status: u16, start: Instant) {
    ::metrics::counter!(
        "echo_requests_total",
        "outcome" => outcome.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("echo_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
