//! Document source trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::Document;
use crate::domain::DomainError;

/// Where the corpus comes from. Only consulted during a build.
#[async_trait]
pub trait DocumentSource: Send + Sync + Debug {
    /// Load every document of the given corpus, in a stable order
    async fn load(&self, corpus_id: &str) -> Result<Vec<Document>, DomainError>;

    fn source_name(&self) -> &'static str;
}
