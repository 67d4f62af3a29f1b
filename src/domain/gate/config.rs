//! Confidence gate configuration types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Two terms that can never be answered together in one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusivePair {
    pub first: String,
    pub second: String,
}

impl ExclusivePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Reject blank terms and pairs where one term contains the other.
    ///
    /// Terms match as substrings, so "RUKSAK" / "RUKSAK PRO" would make any
    /// query naming only the longer term look like it names both.
    pub fn validate(&self) -> Result<(), DomainError> {
        let first = self.first.trim();
        let second = self.second.trim();

        if first.is_empty() || second.is_empty() {
            return Err(DomainError::invalid_configuration(
                "exclusive term pair contains an empty term",
            ));
        }

        let (first_lower, second_lower) = (first.to_lowercase(), second.to_lowercase());
        if first_lower == second_lower {
            return Err(DomainError::invalid_configuration(format!(
                "exclusive term pair repeats the same term '{}'",
                first
            )));
        }

        if first_lower.contains(&second_lower) || second_lower.contains(&first_lower) {
            return Err(DomainError::invalid_configuration(format!(
                "exclusive terms '{}' and '{}' overlap; one contains the other",
                first, second
            )));
        }

        Ok(())
    }
}

/// Configuration for the confidence gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Term pairs that force a fallback when both appear in a query
    #[serde(default)]
    pub exclusive_terms: Vec<ExclusivePair>,
    /// The fixed message returned whenever the gate falls back
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_fallback_message() -> String {
    "Great question! Let me check on that for you.".to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            exclusive_terms: Vec::new(),
            fallback_message: default_fallback_message(),
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.fallback_message.trim().is_empty() {
            return Err(DomainError::invalid_configuration(
                "fallback_message must not be empty",
            ));
        }

        self.exclusive_terms.iter().try_for_each(ExclusivePair::validate)
    }
}
