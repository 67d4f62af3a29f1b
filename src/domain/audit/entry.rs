//! Audit records for answered and refused questions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the user got a generated answer or the fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatOutcome {
    Answered,
    Fallback,
}

impl ChatOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Answered => "answered",
            Self::Fallback => "fallback",
        }
    }
}

/// One exchange as recorded by an [`AuditLog`](super::AuditLog)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub request_id: Uuid,
    pub question: String,
    pub answer: String,
    pub outcome: ChatOutcome,
}

impl AuditEntry {
    pub fn new(
        request_id: Uuid,
        question: impl Into<String>,
        answer: impl Into<String>,
        outcome: ChatOutcome,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            request_id,
            question: question.into(),
            answer: answer.into(),
            outcome,
        }
    }
}
