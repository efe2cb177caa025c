//! Sentence-level key-point extraction from chunk content.

use crate::core::{Chunk, KeyPoint};

use super::heuristics::HeuristicConfig;

/// Picks meaningful sentences out of retrieved chunks.
///
/// This is a lexical filter, not a summarizer: content is split on the
/// configured delimiter, fragments are trimmed, and each chunk contributes
/// its first few fragments that pass [`HeuristicConfig::is_meaningful`].
#[derive(Debug, Clone, Default)]
pub struct KeyPointExtractor {
    heuristics: HeuristicConfig,
}

impl KeyPointExtractor {
    /// Creates an extractor with the given heuristics.
    #[must_use]
    pub const fn new(heuristics: HeuristicConfig) -> Self {
        Self { heuristics }
    }

    /// Extracts key points from `chunks`, preserving chunk and sentence order.
    ///
    /// Chunks without a source yield key points with an empty source.
    #[must_use]
    pub fn extract(&self, chunks: &[Chunk]) -> Vec<KeyPoint> {
        chunks
            .iter()
            .flat_map(|chunk| self.extract_chunk(chunk))
            .collect()
    }

    /// Key points for a single chunk.
    fn extract_chunk<'a>(&'a self, chunk: &'a Chunk) -> impl Iterator<Item = KeyPoint> + 'a {
        let source = chunk.source().unwrap_or_default();
        chunk
            .content
            .split(self.heuristics.sentence_delimiter)
            .map(str::trim)
            .filter(move |sentence| self.heuristics.is_meaningful(sentence))
            .take(self.heuristics.max_points_per_chunk)
            .map(move |sentence| KeyPoint::new(sentence, source))
    }
}
