//! Observability infrastructure - Prometheus metrics

mod config;
pub mod metrics;

pub use self::config::MetricsConfig;
pub use self::metrics::{create_metrics_router, init_metrics, PrometheusMetrics};
