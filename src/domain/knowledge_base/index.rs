//! Knowledge index snapshot and the handle that serves it

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Chunk;

/// An immutable snapshot of the corpus, ordered by (document order, chunk index)
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    chunks: Vec<Chunk>,
    document_count: usize,
    chunks_failed: usize,
    built_at: DateTime<Utc>,
}

impl KnowledgeIndex {
    pub fn new(chunks: Vec<Chunk>, document_count: usize) -> Self {
        Self {
            chunks,
            document_count,
            chunks_failed: 0,
            built_at: Utc::now(),
        }
    }

    /// Record how many chunks were dropped because they could not be embedded
    pub fn with_failed_chunks(mut self, chunks_failed: usize) -> Self {
        self.chunks_failed = chunks_failed;
        self
    }

    /// Index served before the first successful build
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of documents that contributed at least one chunk
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn chunks_failed(&self) -> usize {
        self.chunks_failed
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            chunks: self.len(),
            documents: self.document_count,
            chunks_failed: self.chunks_failed,
            built_at: self.built_at,
        }
    }
}

/// Summary of a served index
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexStats {
    pub chunks: usize,
    pub documents: usize,
    pub chunks_failed: usize,
    pub built_at: DateTime<Utc>,
}

/// Shared, atomically swappable reference to the currently served index.
///
/// Readers clone the inner `Arc` and then work on that snapshot without
/// holding any lock, so a concurrent `replace` can never expose a partially
/// built index.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<KnowledgeIndex>>,
}

impl IndexHandle {
    pub fn new(index: KnowledgeIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// The currently served snapshot
    pub fn snapshot(&self) -> Arc<KnowledgeIndex> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a fully built index, returning the one it replaced
    pub fn replace(&self, index: KnowledgeIndex) -> Arc<KnowledgeIndex> {
        let next = Arc::new(index);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new(KnowledgeIndex::empty())
    }
}
