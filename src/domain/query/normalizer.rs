//! Query normalization: trim and restore canonical casing of product terms

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Query normalization settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Terms rewritten to this exact casing wherever they appear as a word
    /// (a trailing plural "s" is kept)
    #[serde(default)]
    pub canonical_terms: Vec<String>,
}

#[derive(Debug, Clone)]
struct CanonicalTerm {
    term: String,
    pattern: Regex,
    plural: &'static str,
}

/// Rewrites user questions before hints, the gate, and retrieval see them
#[derive(Debug, Clone, Default)]
pub struct QueryNormalizer {
    terms: Vec<CanonicalTerm>,
}

impl QueryNormalizer {
    pub fn new(config: &QueryConfig) -> Result<Self, DomainError> {
        let terms = config
            .canonical_terms
            .iter()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .map(|term| {
                let pattern = Regex::new(&format!(r"(?i)\b{}(s?)\b", regex::escape(term)))
                    .map_err(|e| {
                        DomainError::invalid_configuration(format!(
                            "invalid canonical term '{}': {}",
                            term, e
                        ))
                    })?;

                let plural = if term.chars().any(|c| c.is_lowercase()) {
                    "s"
                } else {
                    "S"
                };

                Ok(CanonicalTerm {
                    term: term.to_string(),
                    pattern,
                    plural,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self { terms })
    }

    pub fn normalize(&self, query: &str) -> String {
        let mut normalized = query.trim().to_string();

        for canonical in &self.terms {
            normalized = canonical
                .pattern
                .replace_all(&normalized, |caps: &Captures<'_>| {
                    let suffix = if caps[1].is_empty() { "" } else { canonical.plural };
                    format!("{}{}", canonical.term, suffix)
                })
                .into_owned();
        }

        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> QueryNormalizer {
        QueryNormalizer::new(&QueryConfig {
            canonical_terms: vec!["RUKVEST".to_string(), "RUKSAK".to_string()],
        })
        .unwrap()
    }

    #[test]
    fn test_rewrites_terms_and_plurals() {
        assert_eq!(
            normalizer().normalize("  do rukvests fit in a Ruksak? "),
            "do RUKVESTS fit in a RUKSAK?"
        );
        assert_eq!(normalizer().normalize("two ruksaks"), "two RUKSAKS");
    }

    #[test]
    fn test_only_whole_words_are_rewritten() {
        assert_eq!(normalizer().normalize("myruksak"), "myruksak");
    }

    #[test]
    fn test_no_terms_only_trims() {
        let normalizer = QueryNormalizer::default();

        assert_eq!(normalizer.normalize("  Hello rukvest  "), "Hello rukvest");
    }

    #[test]
    fn test_mixed_case_term_keeps_lowercase_plural() {
        let normalizer = QueryNormalizer::new(&QueryConfig {
            canonical_terms: vec!["iPhone".to_string()],
        })
        .unwrap();

        assert_eq!(normalizer.normalize("two IPHONES"), "two iPhones");
    }
}
