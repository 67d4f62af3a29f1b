//! Retrieval: rank index chunks against a query

mod hints;
mod result;
mod retriever;

pub use hints::{KeywordHint, KeywordHints};
pub use result::{RetrievalResult, ScoredCandidate};
pub use retriever::{degraded, Retriever};
