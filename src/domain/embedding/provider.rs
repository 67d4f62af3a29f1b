//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// An external embedding service (OpenAI-compatible, local, ...)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed the request's text
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Deterministic embedding provider for tests.
    ///
    /// Texts registered with `with_vector` get that exact vector; anything
    /// else gets a vector derived from the text's bytes.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
        fail_on: Option<String>,
        delay: Option<Duration>,
        text_delays: HashMap<String, Duration>,
        vectors: HashMap<String, Vec<f32>>,
        calls: AtomicUsize,
        completed: Mutex<Vec<String>>,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
                fail_on: None,
                delay: None,
                text_delays: HashMap::new(),
                vectors: HashMap::new(),
                calls: AtomicUsize::new(0),
                completed: Mutex::new(Vec::new()),
            }
        }

        /// Fail every request
        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Fail requests whose text contains `marker`
        pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
            self.fail_on = Some(marker.into());
            self
        }

        /// Sleep before answering
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Sleep before answering requests for exactly `text`
        pub fn with_delay_for(mut self, text: impl Into<String>, delay: Duration) -> Self {
            self.text_delays.insert(text.into(), delay);
            self
        }

        pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
            self.vectors.insert(text.into(), vector);
            self
        }

        /// Number of `embed` calls received so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Texts in the order their requests finished
        pub fn completed(&self) -> Vec<String> {
            self.completed.lock().unwrap().clone()
        }

        fn vector_for(&self, text: &str) -> Vec<f32> {
            if let Some(vector) = self.vectors.get(text) {
                return vector.clone();
            }

            let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            (0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                .collect()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(delay) = self.text_delays.get(request.text()) {
                tokio::time::sleep(*delay).await;
            }
            self.completed
                .lock()
                .unwrap()
                .push(request.text().to_string());

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            if let Some(ref marker) = self.fail_on {
                if request.text().contains(marker.as_str()) {
                    return Err(DomainError::provider(self.name, "simulated failure"));
                }
            }

            Ok(EmbeddingResponse::new(
                request.model(),
                self.vector_for(request.text()),
            ))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }

    mod tests {
        use super::*;

        fn request(text: &str) -> EmbeddingRequest {
            EmbeddingRequest::new("mock-embedding", text)
        }

        #[tokio::test]
        async fn test_mock_provider_counts_calls() {
            let provider = MockEmbeddingProvider::new("test", 16);

            let response = provider.embed(request("Hello")).await.unwrap();

            assert_eq!(response.vector().len(), 16);
            assert_eq!(response.model(), "mock-embedding");
            assert_eq!(provider.calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_provider_fixed_vector() {
            let provider =
                MockEmbeddingProvider::new("test", 3).with_vector("hi", vec![1.0, 0.0, 0.0]);

            let response = provider.embed(request("hi")).await.unwrap();

            assert_eq!(response.vector(), &[1.0, 0.0, 0.0]);
        }

        #[tokio::test]
        async fn test_mock_provider_failing_on_marker() {
            let provider = MockEmbeddingProvider::new("test", 3).failing_on("BROKEN");

            assert!(provider.embed(request("fine")).await.is_ok());
            assert!(provider.embed(request("this is BROKEN")).await.is_err());
        }

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new("test", 32);

            let first = provider.embed(request("Hello")).await.unwrap();
            let second = provider.embed(request("Hello")).await.unwrap();

            assert_eq!(first, second);
        }
    }
}
