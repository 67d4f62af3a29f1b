//! HTTP request, response and error types

pub mod chat;
pub mod error;
pub mod json;

pub use chat::ChatRequest;
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
