//! Embedding provider domain models, the embedder adapter and similarity scoring

mod embedder;
mod provider;
mod request;
mod response;
mod similarity;

pub use embedder::{Embedder, EmbedderConfig};
pub use provider::EmbeddingProvider;
pub use request::EmbeddingRequest;
pub use response::EmbeddingResponse;
pub use similarity::cosine_similarity;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
