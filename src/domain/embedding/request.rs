//! Embedding request sent to a provider

/// One text to embed with one model.
///
/// Chunks are embedded one request at a time, so a rejected request costs
/// a single chunk rather than a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingRequest {
    model: String,
    text: String,
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            dimensions: None,
        }
    }

    /// Ask the model for vectors of this length instead of its native size
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}
