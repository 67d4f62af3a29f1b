//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{ChatService, KnowledgeService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub knowledge_service: Arc<KnowledgeService>,
}

impl AppState {
    pub fn new(chat_service: Arc<ChatService>, knowledge_service: Arc<KnowledgeService>) -> Self {
        Self {
            chat_service,
            knowledge_service,
        }
    }
}
