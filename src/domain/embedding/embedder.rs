//! Embedder adapter: text in, fixed-dimension vector out

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use super::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::DomainError;

/// Settings for the embedder adapter
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Model name passed to the provider
    pub model: String,
    /// Expected vector dimension D; any other length counts as a failure
    pub dimensions: usize,
    /// Upper bound for a single provider call
    pub timeout: Duration,
    /// Extra attempts made by [`Embedder::embed_with_retries`]
    pub max_retries: u32,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            timeout: Duration::from_secs(10),
            max_retries: 1,
        }
    }
}

/// Wraps an [`EmbeddingProvider`] and turns every way it can go wrong
/// (error, timeout, missing or malformed vector) into
/// [`DomainError::EmbeddingUnavailable`]. It never substitutes a zero vector.
#[derive(Debug, Clone)]
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
    config: EmbedderConfig,
}

impl Embedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: EmbedderConfig) -> Self {
        Self { provider, config }
    }

    /// Embed a single text with one bounded attempt
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request =
            EmbeddingRequest::new(&self.config.model, text).with_dimensions(self.config.dimensions);

        let response = match timeout(self.config.timeout, self.provider.embed(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(DomainError::embedding_unavailable(format!(
                    "{} embedding call failed: {}",
                    self.provider.provider_name(),
                    e
                )));
            }
            Err(_) => {
                return Err(DomainError::embedding_unavailable(format!(
                    "{} embedding call timed out after {}ms",
                    self.provider.provider_name(),
                    self.config.timeout.as_millis()
                )));
            }
        };

        if response.vector().len() != self.config.dimensions {
            return Err(DomainError::embedding_unavailable(format!(
                "model '{}' returned {} dimensions, expected {}",
                response.model(),
                response.vector().len(),
                self.config.dimensions
            )));
        }

        let vector = response.into_vector();

        if vector.iter().any(|x| !x.is_finite()) {
            return Err(DomainError::embedding_unavailable(
                "provider returned non-finite values",
            ));
        }

        Ok(vector)
    }

    /// Embed with up to `max_retries` additional attempts
    pub async fn embed_with_retries(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let mut attempt = 0;

        loop {
            match self.embed(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    debug!(attempt, error = %e, "Retrying embedding");
                }
                Err(e) => {
                    warn!(attempts = attempt + 1, error = %e, "Embedding failed");
                    return Err(e);
                }
            }
        }
    }
}
