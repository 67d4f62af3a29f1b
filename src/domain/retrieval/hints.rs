//! Keyword hints: a cheap pre-filter that narrows the candidate chunk set

use serde::{Deserialize, Serialize};

use crate::domain::knowledge_base::Chunk;

/// When `trigger` appears in a query, prefer chunks from documents whose
/// name contains one of `documents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHint {
    pub trigger: String,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl KeywordHint {
    pub fn new(trigger: impl Into<String>, documents: Vec<String>) -> Self {
        Self {
            trigger: trigger.into(),
            documents,
        }
    }
}

/// Case-insensitive keyword hint matcher
#[derive(Debug, Clone, Default)]
pub struct KeywordHints {
    // (lowercased trigger, lowercased document-name fragments)
    hints: Vec<(String, Vec<String>)>,
}

impl KeywordHints {
    pub fn new(hints: &[KeywordHint]) -> Self {
        let hints = hints
            .iter()
            .filter(|h| !h.trigger.trim().is_empty())
            .map(|h| {
                (
                    h.trigger.to_lowercase(),
                    h.documents
                        .iter()
                        .filter(|d| !d.is_empty())
                        .map(|d| d.to_lowercase())
                        .collect(),
                )
            })
            .collect();

        Self { hints }
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Positions of the chunks a query should be ranked against.
    ///
    /// Returns `None` when no hint fires or when the hints that fire match
    /// nothing; the caller then ranks the full index.
    pub fn narrow(&self, query: &str, chunks: &[Chunk]) -> Option<Vec<usize>> {
        let query = query.to_lowercase();
        let fired: Vec<&(String, Vec<String>)> = self
            .hints
            .iter()
            .filter(|(trigger, _)| query.contains(trigger.as_str()))
            .collect();

        if fired.is_empty() {
            return None;
        }

        let selected: Vec<usize> = chunks
            .iter()
            .enumerate()
            .filter(|(_, chunk)| {
                let name = chunk.source_document().to_lowercase();
                let text = chunk.text().to_lowercase();

                fired.iter().any(|(trigger, documents)| {
                    documents.iter().any(|d| name.contains(d.as_str()))
                        || text.contains(trigger.as_str())
                })
            })
            .map(|(pos, _)| pos)
            .collect();

        if selected.is_empty() {
            None
        } else {
            Some(selected)
        }
    }
}
