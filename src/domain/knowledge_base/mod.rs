//! Knowledge base domain: documents, chunks and the served index snapshot

mod document;
mod index;
mod source;

pub use document::{Chunk, Document};
pub use index::{IndexHandle, IndexStats, KnowledgeIndex};
pub use source::DocumentSource;

#[cfg(test)]
pub use source::mock::MockDocumentSource;
