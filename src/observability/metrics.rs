//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_handles_constructed_total` (counter): handle constructions by kind, outcome
//! - `bridge_rpc_calls_total` (counter): connection-level RPC calls by method, outcome
//!
//! Updates are no-ops until a recorder is installed.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::bridge::handles::ContractKind;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

fn outcome(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "error"
    }
}

pub fn record_handle_constructed(kind: ContractKind, ok: bool) {
    metrics::counter!(
        "bridge_handles_constructed_total",
        "kind" => kind.as_str(),
        "outcome" => outcome(ok)
    )
    .increment(1);
}

pub fn record_rpc_call(method: &'static str, ok: bool) {
    metrics::counter!(
        "bridge_rpc_calls_total",
        "method" => method,
        "outcome" => outcome(ok)
    )
    .increment(1);
}
