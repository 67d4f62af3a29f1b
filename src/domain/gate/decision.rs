//! Gate decisions

use std::fmt;

use serde::Serialize;

use crate::domain::retrieval::ScoredCandidate;

/// Why the gate refused to answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The query names two terms that cannot be combined
    ExclusiveTerms { first: String, second: String },
    /// Retrieval returned nothing
    NoEvidence,
    /// The best candidate scored below the threshold
    BelowThreshold { top_score: f32, min_similarity: f32 },
}

impl FallbackReason {
    /// Short label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExclusiveTerms { .. } => "exclusive_terms",
            Self::NoEvidence => "no_evidence",
            Self::BelowThreshold { .. } => "below_threshold",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExclusiveTerms { first, second } => {
                write!(f, "query combines exclusive terms '{}' and '{}'", first, second)
            }
            Self::NoEvidence => write!(f, "no evidence retrieved"),
            Self::BelowThreshold {
                top_score,
                min_similarity,
            } => write!(f, "top score {:.3} below {:.3}", top_score, min_similarity),
        }
    }
}

/// Outcome of the confidence gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Enough evidence; carries every retrieved candidate in ranking order
    Proceed(Vec<ScoredCandidate>),
    Fallback(FallbackReason),
}

impl GateDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed(_))
    }

    /// Metric labels: (decision, reason)
    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::Proceed(_) => ("proceed", "evidence"),
            Self::Fallback(reason) => ("fallback", reason.label()),
        }
    }
}
