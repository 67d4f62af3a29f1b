//! Audit trail of chat exchanges

mod entry;
mod log;

pub use entry::{AuditEntry, ChatOutcome};
pub use log::AuditLog;

#[cfg(test)]
pub use log::mock::MemoryAuditLog;
