//! Knowledge service - builds, swaps and refreshes the served index

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::knowledge_base::{Document, DocumentSource, IndexHandle, IndexStats, KnowledgeIndex};
use crate::domain::DomainError;
use crate::infrastructure::ingestion::IndexBuilder;
use crate::infrastructure::observability::metrics;

/// Summary of a successful rebuild
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildReport {
    pub documents: usize,
    pub chunks_indexed: usize,
    pub chunks_failed: usize,
    pub built_at: DateTime<Utc>,
}

impl From<&KnowledgeIndex> for BuildReport {
    fn from(index: &KnowledgeIndex) -> Self {
        Self {
            documents: index.document_count(),
            chunks_indexed: index.len(),
            chunks_failed: index.chunks_failed(),
            built_at: index.built_at(),
        }
    }
}

/// Owns the served index and every way of replacing it.
///
/// A new index is built off to the side and swapped in only once complete;
/// a failed build leaves the current index in place. Rebuilds are
/// serialized so the most recently finished one is the one served.
#[derive(Debug)]
pub struct KnowledgeService {
    index: Arc<IndexHandle>,
    builder: IndexBuilder,
    source: Arc<dyn DocumentSource>,
    corpus_id: String,
    rebuild_lock: Mutex<()>,
}

impl KnowledgeService {
    pub fn new(
        index: Arc<IndexHandle>,
        builder: IndexBuilder,
        source: Arc<dyn DocumentSource>,
        corpus_id: impl Into<String>,
    ) -> Self {
        Self {
            index,
            builder,
            source,
            corpus_id: corpus_id.into(),
            rebuild_lock: Mutex::new(()),
        }
    }

    pub fn index_handle(&self) -> Arc<IndexHandle> {
        Arc::clone(&self.index)
    }

    /// Stats of the index being served right now
    pub fn stats(&self) -> IndexStats {
        self.index.snapshot().stats()
    }

    /// Build an index from `documents` and serve it
    pub async fn rebuild(&self, documents: &[Document]) -> Result<BuildReport, DomainError> {
        let _guard = self.rebuild_lock.lock().await;
        self.build_and_swap(documents).await
    }

    /// Reload the corpus from the document source and rebuild
    pub async fn refresh(&self) -> Result<BuildReport, DomainError> {
        let _guard = self.rebuild_lock.lock().await;

        let documents = match self.source.load(&self.corpus_id).await {
            Ok(documents) => documents,
            Err(e) => {
                metrics::record_rebuild("failure");
                error!(
                    source = self.source.source_name(),
                    error = %e,
                    "Failed to load corpus, keeping current index"
                );
                return Err(DomainError::build(format!("failed to load corpus: {}", e)));
            }
        };

        self.build_and_swap(&documents).await
    }

    async fn build_and_swap(&self, documents: &[Document]) -> Result<BuildReport, DomainError> {
        match self.builder.build(documents).await {
            Ok(index) => {
                let report = BuildReport::from(&index);
                let previous = self.index.replace(index);

                metrics::record_rebuild("success");
                metrics::set_index_chunks(report.chunks_indexed);
                info!(
                    documents = report.documents,
                    chunks = report.chunks_indexed,
                    failed = report.chunks_failed,
                    previous_chunks = previous.len(),
                    "Knowledge index swapped"
                );

                Ok(report)
            }
            Err(e) => {
                metrics::record_rebuild("failure");
                error!(error = %e, "Index rebuild failed, keeping current index");
                Err(e)
            }
        }
    }

    /// Refresh every `interval` until the returned task is aborted.
    ///
    /// The first refresh happens one interval after spawning.
    pub fn spawn_periodic_refresh(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                // Failures are already logged and counted
                let _ = self.refresh().await;
            }
        })
    }
}
