//! Chat endpoint

use axum::extract::State;

use super::state::AppState;
use super::types::{ApiError, ChatRequest, Json};
use crate::infrastructure::services::ChatReply;

/// `POST /chat` - always a generated answer or the fallback message
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state.chat_service.ask(&request.message).await?;
    Ok(Json(reply))
}
