//! Audit log trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::AuditEntry;
use crate::domain::DomainError;

/// Append-only record of chat exchanges.
///
/// Callers log and ignore errors; recording never changes a response.
#[async_trait]
pub trait AuditLog: Send + Sync + Debug {
    async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    pub struct MemoryAuditLog {
        entries: Mutex<Vec<AuditEntry>>,
        fail: bool,
    }

    impl MemoryAuditLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn entries(&self) -> Vec<AuditEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuditLog for MemoryAuditLog {
        async fn record(&self, entry: &AuditEntry) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::internal("audit sink unavailable"));
            }

            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }
}
