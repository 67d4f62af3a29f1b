//! Index refresh endpoint

use axum::extract::State;

use super::state::AppState;
use super::types::{ApiError, Json};
use crate::infrastructure::services::BuildReport;

/// `POST /refresh` - reload the corpus and swap in a new index.
///
/// On failure the previous index keeps serving and the caller gets a 503.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<BuildReport>, ApiError> {
    let report = state.knowledge_service.refresh().await?;
    Ok(Json(report))
}
