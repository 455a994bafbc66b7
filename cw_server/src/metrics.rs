//! Prometheus metrics for the wallet server.
//!
//! Counters and histograms are exported over a dedicated scrape listener in
//! Prometheus text format. Three families are emitted: HTTP traffic (count
//! and latency per route), wallet operations (count by outcome plus amounts
//! moved), and sign-up outcomes.
//!
//! ```rust,no_run
//! use cw_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_request("POST", "/api/v1/wallet/fund", 200, 12.5);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::net::SocketAddr;

/// Start the Prometheus exporter.
///
/// Metrics become scrapeable at `http://<addr>/metrics`. Call once at
/// startup; recording macros are no-ops until this runs.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Prometheus exporter failed to start: {e}"))
}

/// Record one completed HTTP request.
///
/// Bumps `http_requests_total` (labelled by method, path, and status) and
/// records the latency into `http_request_duration_ms`.
pub fn http_request(method: &str, path: &str, status: u16, elapsed_ms: f64) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(elapsed_ms);
}

/// Increment the wallet operation counter.
///
/// `operation` is one of `fund`, `transfer`, `withdraw`; `outcome` is
/// `success` or `failure`.
pub fn wallet_operations_total(operation: &str, outcome: &str) {
    metrics::counter!("wallet_operations_total",
        "operation" => operation.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record the amount moved by a successful wallet operation.
pub fn wallet_amount_moved(operation: &str, amount: Decimal) {
    metrics::histogram!("wallet_amount_moved",
        "operation" => operation.to_string()
    )
    .record(amount.to_f64().unwrap_or(0.0));
}

/// Increment the sign-up counter.
///
/// `outcome` is one of `success`, `blacklisted`, `rejected`, `failed`.
pub fn signups_total(outcome: &str) {
    metrics::counter!("signups_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
