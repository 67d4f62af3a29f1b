//! Domain layer - Core types, algorithms and collaborator traits

pub mod audit;
pub mod embedding;
pub mod error;
pub mod gate;
pub mod generation;
pub mod ingestion;
pub mod knowledge_base;
pub mod query;
pub mod retrieval;

pub use audit::{AuditEntry, AuditLog, ChatOutcome};
pub use embedding::{cosine_similarity, Embedder, EmbedderConfig, EmbeddingProvider};
pub use error::DomainError;
pub use gate::{ConfidenceGate, ExclusivePair, FallbackReason, GateConfig, GateDecision};
pub use generation::{AnswerGenerator, Prompt, PromptBuilder};
pub use ingestion::{ChunkingConfig, ChunkingStrategy, TextChunk};
pub use knowledge_base::{Chunk, Document, DocumentSource, IndexHandle, IndexStats, KnowledgeIndex};
pub use query::{QueryConfig, QueryNormalizer};
pub use retrieval::{KeywordHint, KeywordHints, RetrievalResult, Retriever, ScoredCandidate};
