//! Infrastructure services

mod chat_service;
mod knowledge_service;

pub use chat_service::{ChatReply, ChatService, ChatServiceDeps, ChatSettings};
pub use knowledge_service::{BuildReport, KnowledgeService};
