//! Prometheus metrics infrastructure
//!
//! The `record_*` helpers are no-ops until a recorder is installed, so
//! library code and tests can call them unconditionally.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

/// Prometheus metrics handle for serving the scrape endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics in Prometheus text format
    pub fn render(&self) -> String {
        self.handle.render()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("rag_gate_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path().to_string();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request; `path` should be the matched route, not the raw URI
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record one retrieval and how many candidates it returned
pub fn record_retrieval(candidates: usize, duration: Duration) {
    counter!("retrieval_requests_total").increment(1);
    histogram!("retrieval_candidates").record(candidates as f64);
    histogram!("retrieval_duration_seconds").record(duration.as_secs_f64());
}

/// Record embedding failures; `phase` is "build" or "query"
pub fn record_embedding_failures(phase: &'static str, count: u64) {
    counter!("embedding_failures_total", "phase" => phase).increment(count);
}

/// Record a confidence gate outcome
pub fn record_gate_decision(decision: &'static str, reason: &'static str) {
    counter!("gate_decisions_total", "decision" => decision, "reason" => reason).increment(1);
}

/// Record an index rebuild attempt; `status` is "success" or "failure"
pub fn record_rebuild(status: &'static str) {
    counter!("index_rebuilds_total", "status" => status).increment(1);
}

/// Publish the size of the index currently being served
pub fn set_index_chunks(chunks: usize) {
    gauge!("index_chunks").set(chunks as f64);
}
