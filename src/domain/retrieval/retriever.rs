//! Top-K retrieval over the served knowledge index

use std::sync::Arc;

use tracing::{debug, warn};

use super::hints::KeywordHints;
use super::result::{rank, RetrievalResult, ScoredCandidate};
use crate::domain::embedding::{cosine_similarity, Embedder};
use crate::domain::knowledge_base::IndexHandle;
use crate::domain::DomainError;

/// Ranks chunks of the current index snapshot against a query.
///
/// Retrieval never fails outward: an empty corpus or an unreachable
/// embedding service both produce an empty result, which the gate turns
/// into a fallback.
#[derive(Debug, Clone)]
pub struct Retriever {
    index: Arc<IndexHandle>,
    embedder: Embedder,
    hints: KeywordHints,
}

impl Retriever {
    pub fn new(index: Arc<IndexHandle>, embedder: Embedder) -> Self {
        Self {
            index,
            embedder,
            hints: KeywordHints::default(),
        }
    }

    pub fn with_hints(mut self, hints: KeywordHints) -> Self {
        self.hints = hints;
        self
    }

    /// Return at most `top_k` candidates, best first.
    ///
    /// Any failure degrades to an empty result.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> RetrievalResult {
        self.try_retrieve(query, top_k)
            .await
            .unwrap_or_else(|e| degraded(&e))
    }

    /// Like [`Retriever::retrieve`] but reports why nothing could be ranked:
    /// [`DomainError::EmptyCorpus`] or [`DomainError::EmbeddingUnavailable`].
    pub async fn try_retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<RetrievalResult, DomainError> {
        // Held for the whole call so a concurrent rebuild cannot mix indexes
        let snapshot = self.index.snapshot();

        if snapshot.is_empty() {
            return Err(DomainError::EmptyCorpus);
        }

        if top_k == 0 {
            return Ok(RetrievalResult::empty());
        }

        let query_vector = self.embedder.embed(query).await?;
        let chunks = snapshot.chunks();

        let positions: Vec<usize> = match self.hints.narrow(query, chunks) {
            Some(positions) => {
                debug!(narrowed = positions.len(), total = chunks.len(), "Keyword hint applied");
                positions
            }
            None => (0..chunks.len()).collect(),
        };

        let mut scored: Vec<(usize, f32)> = positions
            .into_iter()
            .filter(|&pos| chunks[pos].is_scorable(query_vector.len()))
            .map(|pos| {
                let score = cosine_similarity(&query_vector, chunks[pos].vector()).clamp(0.0, 1.0);
                (pos, score)
            })
            .collect();

        scored.sort_by(|&(a, score_a), &(b, score_b)| rank(score_a, &chunks[a], score_b, &chunks[b]));
        scored.truncate(top_k);

        let candidates = scored
            .into_iter()
            .map(|(pos, score)| ScoredCandidate::new(chunks[pos].clone(), score))
            .collect();

        Ok(RetrievalResult::from_candidates(candidates))
    }
}

/// Empty result standing in for a failed retrieval
pub fn degraded(err: &DomainError) -> RetrievalResult {
    match err {
        DomainError::EmptyCorpus => debug!("Knowledge index is empty, nothing to retrieve"),
        e => warn!(error = %e, "Retrieval degraded to empty result"),
    }
    RetrievalResult::empty()
}
