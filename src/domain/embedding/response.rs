//! Embedding vector returned by a provider

/// The vector a provider produced for one request.
///
/// Nothing here is validated; the [`Embedder`](super::Embedder) checks the
/// dimension before the vector is used.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingResponse {
    model: String,
    vector: Vec<f32>,
}

impl EmbeddingResponse {
    pub fn new(model: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            model: model.into(),
            vector,
        }
    }

    /// Model that produced the vector, as reported by the provider
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.vector
    }
}
