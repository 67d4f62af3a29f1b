//! Audit log implementations

mod jsonl;
mod tracing_log;

pub use jsonl::JsonlAuditLog;
pub use tracing_log::TracingAuditLog;
