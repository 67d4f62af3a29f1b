//! Source documents and the chunks cut from them

use serde::Serialize;

/// A document as delivered by the document source. Replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Empty or whitespace-only documents contribute nothing to the index
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// An embedded window of a document, the unit of retrieval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    source_document: String,
    index: usize,
    text: String,
    #[serde(skip)]
    vector: Vec<f32>,
}

impl Chunk {
    pub fn new(
        source_document: impl Into<String>,
        index: usize,
        text: impl Into<String>,
        vector: Vec<f32>,
    ) -> Self {
        Self {
            source_document: source_document.into(),
            index,
            text: text.into(),
            vector,
        }
    }

    pub fn source_document(&self) -> &str {
        &self.source_document
    }

    /// 0-based position within the source document
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Whether this chunk can be scored against a query vector of `dimensions`
    pub fn is_scorable(&self, dimensions: usize) -> bool {
        !self.vector.is_empty() && self.vector.len() == dimensions
    }
}
