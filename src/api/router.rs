use axum::{
    http::Uri,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::types::ApiError;
use super::{chat, health, refresh};
use crate::domain::DomainError;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/check", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/ready", get(health::ready_check))
        .route("/chat", post(chat::chat))
        .route("/refresh", post(refresh::refresh))
        .fallback(not_found)
        // Route layers see the matched path
        .route_layer(middleware::from_fn(super::middleware::metrics_middleware))
        .route_layer(middleware::from_fn(super::middleware::logging_middleware))
        .with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics));
    }

    router.layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> ApiError {
    DomainError::not_found(format!("no route for {}", uri.path())).into()
}
