//! Fixed-size chunking strategy

use crate::domain::ingestion::{ChunkMetadata, ChunkingConfig, ChunkingStrategy, TextChunk};

/// Splits text into windows of `chunk_size` characters, each starting
/// `chunk_size - chunk_overlap` characters after the previous one.
///
/// Offsets are character positions, so multi-byte text is never cut inside
/// a code point. The last window may be shorter than `chunk_size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSizeChunker;

impl FixedSizeChunker {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for FixedSizeChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Vec<TextChunk> {
        if content.is_empty() {
            return Vec::new();
        }

        // Byte offset of every char, plus the end of the string
        let mut boundaries: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();
        let char_count = boundaries.len();
        boundaries.push(content.len());

        let step = config.step();
        let mut chunks = Vec::with_capacity(char_count / step + 1);
        let mut start = 0;

        while start < char_count {
            let end = (start + config.chunk_size()).min(char_count);
            let text = &content[boundaries[start]..boundaries[end]];

            chunks.push(TextChunk::new(
                text,
                ChunkMetadata::new(chunks.len(), start, end),
            ));

            start += step;
        }

        chunks
    }

    fn name(&self) -> &'static str {
        "fixed_size"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap).unwrap()
    }

    fn contents(chunks: &[TextChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    /// Rebuild the source from each chunk's contribution past its predecessor
    fn reconstruct(chunks: &[TextChunk]) -> String {
        let mut out = String::new();
        let mut covered = 0usize;

        for chunk in chunks {
            let skip = covered.saturating_sub(chunk.metadata.char_start);
            out.extend(chunk.content.chars().skip(skip));
            covered = covered.max(chunk.metadata.char_end);
        }

        out
    }

    #[test]
    fn test_empty_content() {
        let chunks = FixedSizeChunker::new().chunk("", &ChunkingConfig::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_small_content_single_chunk() {
        let text = "The RUKVEST comes in 3kg, 5kg, 8kg and 11kg fixed weights.";
        let chunks = FixedSizeChunker::new().chunk(text, &config(800, 0));

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!(chunks[0].metadata, ChunkMetadata::new(0, 0, text.chars().count()));
    }

    #[test]
    fn test_without_overlap() {
        let chunks = FixedSizeChunker::new().chunk("abcdefghij", &config(5, 0));
        assert_eq!(contents(&chunks), vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_overlap_follows_step() {
        let chunks = FixedSizeChunker::new().chunk("abcdefghij", &config(6, 2));

        // starts at 0, 4, 8
        assert_eq!(contents(&chunks), vec!["abcdef", "efghij", "ij"]);
        assert_eq!(chunks[2].metadata.chunk_index, 2);
        assert_eq!(reconstruct(&chunks), "abcdefghij");
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let chunks = FixedSizeChunker::new().chunk("  ab  ", &config(3, 0));
        assert_eq!(contents(&chunks), vec!["  a", "b  "]);
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "héllo wörld 💪 strong";
        let chunks = FixedSizeChunker::new().chunk(text, &config(4, 1));

        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 4);
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_name() {
        assert_eq!(FixedSizeChunker::new().name(), "fixed_size");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn chunks_reconstruct_text_and_share_overlap(
            text in "\\PC{0,300}",
            size in 1usize..40,
            overlap_seed in 0usize..40,
        ) {
            let overlap = overlap_seed % size;
            let chunks = FixedSizeChunker::new().chunk(&text, &config(size, overlap));

            prop_assert_eq!(reconstruct(&chunks), text.clone());

            for chunk in &chunks {
                prop_assert!(chunk.content.chars().count() <= size);
            }

            for (i, pair) in chunks.windows(2).enumerate() {
                prop_assert_eq!(pair[0].metadata.chunk_index, i);
                prop_assert_eq!(pair[1].metadata.char_start, pair[0].metadata.char_start + size - overlap);

                // Only full-size windows are guaranteed to overlap by exactly `overlap`
                if pair[0].metadata.char_len() == size {
                    let shared = pair[0].metadata.char_end - pair[1].metadata.char_start;
                    prop_assert_eq!(shared, overlap);
                }
            }
        }
    }
}
