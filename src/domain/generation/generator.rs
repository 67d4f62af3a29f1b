//! Answer generator trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::Prompt;
use crate::domain::DomainError;

/// Produces the final answer text once the gate has decided to proceed
#[async_trait]
pub trait AnswerGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &Prompt) -> Result<String, DomainError>;

    /// Get the generator name
    fn generator_name(&self) -> &'static str;
}
