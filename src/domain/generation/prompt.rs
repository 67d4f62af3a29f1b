//! Prompt assembly for answer generation

use serde::Serialize;

use crate::domain::retrieval::ScoredCandidate;

/// A prompt ready to send to a chat model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builds prompts from a question and the evidence the gate let through
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_prompt: String,
    max_context_chars: usize,
}

impl PromptBuilder {
    pub fn new(system_prompt: impl Into<String>, max_context_chars: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            max_context_chars,
        }
    }

    /// Evidence is joined in retrieval order and cut at `max_context_chars`
    pub fn build(&self, question: &str, evidence: &[ScoredCandidate]) -> Prompt {
        let joined = evidence
            .iter()
            .map(|c| c.chunk.text())
            .collect::<Vec<_>>()
            .join("\n\n");

        let context = match joined.char_indices().nth(self.max_context_chars) {
            Some((cut, _)) => &joined[..cut],
            None => joined.as_str(),
        };

        Prompt {
            system: self.system_prompt.clone(),
            user: format!(
                "Customer asked:\n\"{}\"\n\nRelevant knowledge:\n\"{}\"",
                question, context
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge_base::Chunk;

    fn evidence(texts: &[&str]) -> Vec<ScoredCandidate> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| ScoredCandidate::new(Chunk::new("doc", i, *t, vec![1.0]), 0.9))
            .collect()
    }

    #[test]
    fn test_prompt_contains_question_and_evidence_in_order() {
        let prompt = PromptBuilder::new("Be helpful.", 1000)
            .build("How heavy?", &evidence(&["first", "second"]));

        assert_eq!(prompt.system, "Be helpful.");
        assert!(prompt.user.contains("How heavy?"));
        assert!(prompt.user.contains("first\n\nsecond"));
    }

    #[test]
    fn test_context_is_truncated_on_char_boundary() {
        let prompt = PromptBuilder::new("", 3).build("q", &evidence(&["ééééé"]));

        assert!(prompt.user.contains("\"ééé\""));
        assert!(!prompt.user.contains("éééé"));
    }
}
