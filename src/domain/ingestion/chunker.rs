//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Validated chunking configuration.
///
/// Sizes are measured in characters, not bytes. A value of this type always
/// satisfies `chunk_size > 0` and `chunk_overlap < chunk_size`, so chunking
/// itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChunkingConfig", into = "RawChunkingConfig")]
pub struct ChunkingConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawChunkingConfig {
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    chunk_overlap: usize,
}

fn default_chunk_size() -> usize {
    800
}

fn default_chunk_overlap() -> usize {
    100
}

impl TryFrom<RawChunkingConfig> for ChunkingConfig {
    type Error = DomainError;

    fn try_from(raw: RawChunkingConfig) -> Result<Self, Self::Error> {
        Self::new(raw.chunk_size, raw.chunk_overlap)
    }
}

impl From<ChunkingConfig> for RawChunkingConfig {
    fn from(config: ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        }
    }
}

impl ChunkingConfig {
    /// Create a new chunking configuration, rejecting impossible combinations
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, DomainError> {
        if chunk_size == 0 {
            return Err(DomainError::invalid_configuration(
                "chunk_size must be greater than 0",
            ));
        }

        if chunk_overlap >= chunk_size {
            return Err(DomainError::invalid_configuration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Distance between the starts of two consecutive chunks
    pub fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

/// Position of a chunk inside its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Index of this chunk (0-based)
    pub chunk_index: usize,
    /// Character offset where this chunk starts
    pub char_start: usize,
    /// Character offset where this chunk ends (exclusive)
    pub char_end: usize,
}

impl ChunkMetadata {
    pub fn new(chunk_index: usize, char_start: usize, char_end: usize) -> Self {
        Self {
            chunk_index,
            char_start,
            char_end,
        }
    }

    /// Number of characters covered
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }
}

/// A window of text cut from a document, not yet embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl TextChunk {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn index(&self) -> usize {
        self.metadata.chunk_index
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into ordered chunks. Empty content yields no chunks.
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Vec<TextChunk>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}
