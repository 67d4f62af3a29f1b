//! Confidence gate: decides between answering and the fixed fallback

mod config;
mod decision;
mod gate;

pub use self::config::{ExclusivePair, GateConfig};
pub use decision::{FallbackReason, GateDecision};
pub use gate::ConfidenceGate;
