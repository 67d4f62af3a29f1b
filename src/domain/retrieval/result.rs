//! Retrieval result types

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::knowledge_base::Chunk;

/// A chunk paired with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub chunk: Chunk,
    /// Similarity in [0, 1]
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self {
            chunk,
            score: score.clamp(0.0, 1.0),
        }
    }
}

/// Ranking order: higher score first, ties by document name then chunk index
pub(crate) fn rank(score_a: f32, a: &Chunk, score_b: f32, b: &Chunk) -> Ordering {
    score_b
        .total_cmp(&score_a)
        .then_with(|| a.source_document().cmp(b.source_document()))
        .then_with(|| a.index().cmp(&b.index()))
}

/// Candidates sorted by descending score, at most top-K long
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetrievalResult {
    candidates: Vec<ScoredCandidate>,
}

impl RetrievalResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result, putting candidates into ranking order
    pub fn from_candidates(mut candidates: Vec<ScoredCandidate>) -> Self {
        candidates.sort_by(|a, b| rank(a.score, &a.chunk, b.score, &b.chunk));
        Self { candidates }
    }

    pub fn candidates(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<ScoredCandidate> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Score of the best candidate
    pub fn top_score(&self) -> Option<f32> {
        self.candidates.first().map(|c| c.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(doc: &str, index: usize, score: f32) -> ScoredCandidate {
        ScoredCandidate::new(Chunk::new(doc, index, "text", vec![1.0]), score)
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(candidate("a", 0, -0.4).score, 0.0);
        assert_eq!(candidate("a", 0, 1.2).score, 1.0);
        assert_eq!(candidate("a", 0, 0.42).score, 0.42);
    }

    #[test]
    fn test_from_candidates_sorts_descending() {
        let result = RetrievalResult::from_candidates(vec![
            candidate("a", 0, 0.2),
            candidate("b", 0, 0.9),
            candidate("c", 0, 0.5),
        ]);

        let scores: Vec<f32> = result.candidates().iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![0.9, 0.5, 0.2]);
        assert_eq!(result.top_score(), Some(0.9));
    }

    #[test]
    fn test_ties_broken_by_document_then_index() {
        let result = RetrievalResult::from_candidates(vec![
            candidate("b.txt", 0, 0.5),
            candidate("a.txt", 2, 0.5),
            candidate("a.txt", 1, 0.5),
        ]);

        let order: Vec<(&str, usize)> = result
            .candidates()
            .iter()
            .map(|c| (c.chunk.source_document(), c.chunk.index()))
            .collect();

        assert_eq!(order, vec![("a.txt", 1), ("a.txt", 2), ("b.txt", 0)]);
    }

    #[test]
    fn test_empty_result() {
        let result = RetrievalResult::empty();

        assert!(result.is_empty());
        assert_eq!(result.top_score(), None);
    }
}
