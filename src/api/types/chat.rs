//! Chat endpoint request type

use serde::Deserialize;

/// `POST /chat` body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}
