//! Document ingestion domain: splitting text into retrievable windows

pub mod chunker;

pub use chunker::{ChunkMetadata, ChunkingConfig, ChunkingStrategy, TextChunk};
