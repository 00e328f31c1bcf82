//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): total requests by method, route, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `api_product_lookups_total` (counter): product lookups by outcome
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op (tests, metrics off)
//! - Labels use the matched route template, never the raw path

use std::net::SocketAddr;
use std::time::Instant;
use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("api_requests_total", &labels).increment(1);
    histogram!("api_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record a product lookup outcome ("hit", "miss", "error").
pub fn record_product_lookup(outcome: &'static str) {
    counter!("api_product_lookups_total", "outcome" => outcome).increment(1);
}

/// Middleware recording request count and latency.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
