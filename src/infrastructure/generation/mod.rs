//! Answer generator implementations

mod openai;

pub use openai::OpenAiAnswerGenerator;
