//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use super::types::Json;
use crate::domain::knowledge_base::IndexStats;

/// Liveness response, `{"status": "ok", ...}`
#[derive(Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Readiness response describing the served index
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub index: IndexStats,
}

/// `GET /health` and `GET /check`
pub async fn health_check() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /live`
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// `GET /ready` - degraded while the index is empty, since every question
/// falls back; still 200 because the service answers correctly
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let index = state.knowledge_service.stats();
    let status = if index.chunks == 0 {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    (
        StatusCode::OK,
        Json(ReadinessResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            index,
        }),
    )
}
