//! Audit log that emits one structured log line per exchange

use async_trait::async_trait;
use tracing::info;

use crate::domain::audit::{AuditEntry, AuditLog};
use crate::domain::DomainError;

#[derive(Debug, Clone, Default)]
pub struct TracingAuditLog;

impl TracingAuditLog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditLog for TracingAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        info!(
            target: "audit",
            request_id = %entry.request_id,
            timestamp = %entry.timestamp.to_rfc3339(),
            outcome = entry.outcome.as_str(),
            question = %entry.question,
            answer = %entry.answer,
            "Chat exchange"
        );
        Ok(())
    }
}
