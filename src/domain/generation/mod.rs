//! Answer generation collaborator

mod generator;
mod prompt;

pub use generator::AnswerGenerator;
pub use prompt::{Prompt, PromptBuilder};

#[cfg(test)]
pub use generator::mock::MockAnswerGenerator;
