//! Index build pipeline: documents -> chunks -> embedded chunks -> index

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::embedding::Embedder;
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy, TextChunk};
use crate::domain::knowledge_base::{Chunk, Document, KnowledgeIndex};
use crate::domain::DomainError;
use crate::infrastructure::observability::metrics;

/// Builds a fresh [`KnowledgeIndex`] from a document snapshot.
///
/// Chunk embeddings are requested concurrently (at most `max_concurrency`
/// in flight) but the resulting index is ordered by document order and chunk
/// index, never by completion order.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    chunker: Arc<dyn ChunkingStrategy>,
    chunking: ChunkingConfig,
    embedder: Embedder,
    max_concurrency: usize,
}

impl IndexBuilder {
    pub fn new(
        chunker: Arc<dyn ChunkingStrategy>,
        chunking: ChunkingConfig,
        embedder: Embedder,
    ) -> Self {
        Self {
            chunker,
            chunking,
            embedder,
            max_concurrency: 8,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Build an index from `documents`.
    ///
    /// A chunk whose embedding still fails after retries is dropped and
    /// counted. The build only fails when there was something to embed and
    /// nothing could be embedded at all.
    pub async fn build(&self, documents: &[Document]) -> Result<KnowledgeIndex, DomainError> {
        let mut pending: Vec<(usize, TextChunk)> = Vec::new();
        let mut skipped = 0;

        for (doc_idx, document) in documents.iter().enumerate() {
            if !document.has_content() {
                skipped += 1;
                debug!(document = %document.name(), "Skipping empty document");
                continue;
            }

            let chunks = self.chunker.chunk(document.text(), &self.chunking);
            pending.extend(chunks.into_iter().map(|chunk| (doc_idx, chunk)));
        }

        let attempted = pending.len();
        info!(
            documents = documents.len(),
            skipped,
            chunks = attempted,
            chunker = self.chunker.name(),
            "Building knowledge index"
        );

        let embedder = &self.embedder;
        let embedded: Vec<(usize, TextChunk, Result<Vec<f32>, DomainError>)> = stream::iter(pending)
            .map(|(doc_idx, chunk)| async move {
                let vector = embedder.embed_with_retries(&chunk.content).await;
                (doc_idx, chunk, vector)
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut chunks = Vec::with_capacity(attempted);
        let mut failed = 0;
        let mut contributing: Vec<usize> = Vec::new();

        for (doc_idx, text_chunk, vector) in embedded {
            let name = documents[doc_idx].name();

            match vector {
                Ok(vector) => {
                    if contributing.last() != Some(&doc_idx) {
                        contributing.push(doc_idx);
                    }
                    chunks.push(Chunk::new(name, text_chunk.index(), text_chunk.content, vector));
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        document = %name,
                        chunk = text_chunk.index(),
                        error = %e,
                        "Dropping chunk that could not be embedded"
                    );
                }
            }
        }

        if failed > 0 {
            metrics::record_embedding_failures("build", failed as u64);
        }

        if attempted > 0 && chunks.is_empty() {
            return Err(DomainError::build(format!(
                "all {} chunks failed to embed",
                attempted
            )));
        }

        info!(
            chunks = chunks.len(),
            failed,
            documents = contributing.len(),
            "Knowledge index built"
        );

        Ok(KnowledgeIndex::new(chunks, contributing.len()).with_failed_chunks(failed))
    }
}
