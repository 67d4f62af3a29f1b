//! Confidence gate: answer or fall back

use tracing::debug;

use super::{ExclusivePair, FallbackReason, GateDecision};
use crate::domain::retrieval::RetrievalResult;

/// Decides whether retrieved evidence is strong enough to answer.
///
/// Both checks are pure: the same inputs always give the same decision.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceGate {
    // Lowercased copies of the configured pairs
    exclusive_terms: Vec<(String, String, ExclusivePair)>,
}

impl ConfidenceGate {
    pub fn new(exclusive_terms: &[ExclusivePair]) -> Self {
        let exclusive_terms = exclusive_terms
            .iter()
            .map(|pair| {
                (
                    pair.first.trim().to_lowercase(),
                    pair.second.trim().to_lowercase(),
                    pair.clone(),
                )
            })
            .collect();

        Self { exclusive_terms }
    }

    /// Hard rule checked before retrieval: a query that mentions both terms
    /// of a configured pair can never be answered
    pub fn check_exclusive(&self, query: &str) -> Option<FallbackReason> {
        let query = query.to_lowercase();

        self.exclusive_terms
            .iter()
            .find(|(first, second, _)| {
                !first.is_empty()
                    && !second.is_empty()
                    && query.contains(first.as_str())
                    && query.contains(second.as_str())
            })
            .map(|(_, _, pair)| FallbackReason::ExclusiveTerms {
                first: pair.first.clone(),
                second: pair.second.clone(),
            })
    }

    /// Proceed with all candidates when the top score reaches `min_similarity`
    pub fn decide(&self, result: RetrievalResult, min_similarity: f32) -> GateDecision {
        let Some(top_score) = result.top_score() else {
            return GateDecision::Fallback(FallbackReason::NoEvidence);
        };

        if top_score < min_similarity {
            debug!(top_score, min_similarity, "Evidence below threshold");
            return GateDecision::Fallback(FallbackReason::BelowThreshold {
                top_score,
                min_similarity,
            });
        }

        GateDecision::Proceed(result.into_candidates())
    }
}
