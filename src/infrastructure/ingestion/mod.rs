//! Ingestion infrastructure: chunkers and the index build pipeline

mod chunkers;
mod pipeline;

pub use chunkers::FixedSizeChunker;
pub use pipeline::IndexBuilder;
