//! rag-gate
//!
//! Answers questions from a bounded, periodically refreshed document corpus
//! and returns a fixed fallback message whenever the retrieved evidence is
//! too weak:
//! - Fixed-size overlapping chunking and embedding of the corpus
//! - Atomically swapped knowledge index with bounded-concurrency rebuilds
//! - Cosine top-K retrieval with keyword hints
//! - A confidence gate with a similarity threshold and exclusive term pairs

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{
    audit::AuditLog, ConfidenceGate, Embedder, IndexHandle, KeywordHints, PromptBuilder,
    QueryNormalizer, Retriever,
};
use infrastructure::{
    audit::{JsonlAuditLog, TracingAuditLog},
    corpus::DirectoryDocumentSource,
    embedding::OpenAiEmbeddingProvider,
    generation::OpenAiAnswerGenerator,
    http_client::HttpClient,
    ingestion::{FixedSizeChunker, IndexBuilder},
    services::{ChatService, ChatServiceDeps, ChatSettings, KnowledgeService},
};
use tracing::info;

/// Wire the production collaborators described by `config`.
///
/// The returned state serves an empty index until the first refresh.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let embedding_provider = OpenAiEmbeddingProvider::with_base_url(
        HttpClient::with_timeout(config.embedding.timeout())?,
        config.embedding.api_key(),
        config.embedding.base_url.clone(),
    );
    let embedder = Embedder::new(
        Arc::new(embedding_provider),
        config.embedding.embedder_config(),
    );

    let index = Arc::new(IndexHandle::default());
    let builder = IndexBuilder::new(
        Arc::new(FixedSizeChunker::new()),
        config.chunking,
        embedder.clone(),
    )
    .with_max_concurrency(config.embedding.max_concurrency);

    let knowledge_service = Arc::new(KnowledgeService::new(
        Arc::clone(&index),
        builder,
        Arc::new(DirectoryDocumentSource::new(config.corpus.directory.clone())),
        config.corpus.corpus_id.clone(),
    ));

    let generator = OpenAiAnswerGenerator::with_base_url(
        HttpClient::with_timeout(config.generation.timeout())?,
        config.generation.api_key(),
        config.generation.model.clone(),
        config.generation.base_url.clone(),
    );

    let audit: Arc<dyn AuditLog> = match &config.audit.path {
        Some(path) => Arc::new(JsonlAuditLog::new(path.clone())),
        None => Arc::new(TracingAuditLog::new()),
    };

    let retriever =
        Retriever::new(index, embedder).with_hints(KeywordHints::new(&config.retrieval.hints));

    let chat_service = Arc::new(ChatService::new(
        ChatServiceDeps {
            normalizer: QueryNormalizer::new(&config.query)?,
            gate: ConfidenceGate::new(&config.gate.exclusive_terms),
            retriever,
            prompts: PromptBuilder::new(
                config.generation.system_prompt.clone(),
                config.generation.max_context_chars,
            ),
            generator: Arc::new(generator),
            audit,
        },
        ChatSettings {
            top_k: config.retrieval.top_k,
            min_similarity: config.retrieval.min_similarity,
            fallback_message: config.gate.fallback_message.clone(),
        },
    ));

    info!(
        corpus = %config.corpus.directory.display(),
        embedding_model = %config.embedding.model,
        generation_model = %config.generation.model,
        "Application state created"
    );

    Ok(AppState::new(chat_service, knowledge_service))
}
