//! Prometheus metrics
//!
//! Counters and histograms recorded through the `metrics` facade and
//! rendered by the Prometheus exporter at `/metrics`.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use voice_bill_core::BillSource;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global Prometheus recorder
///
/// Safe to call more than once; later calls return the first handle.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Some(handle.clone());
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = PROMETHEUS_HANDLE.set(handle.clone());
            Some(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// A bill was produced
pub fn record_bill(source: BillSource, lines: usize) {
    metrics::counter!("bills_total", "source" => source.as_str()).increment(1);
    metrics::counter!("order_lines_total").increment(lines as u64);
}

/// Neither the parser nor the fallback produced any line
pub fn record_unparsed() {
    metrics::counter!("bills_unparsed_total").increment(1);
}

/// Time spent in the deterministic parser
pub fn record_parse_latency(elapsed: Duration) {
    metrics::histogram!("parse_duration_seconds").record(elapsed.as_secs_f64());
}
