//! Metadata about a completed search.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::chunk::Chunk;

/// Number of sources listed in the sources overview.
pub const SOURCES_OVERVIEW_LIMIT: usize = 5;

/// Label used for chunks without a source when counting unique sources.
const UNKNOWN: &str = "Unknown";

/// Summary statistics for one query and the chunks it returned.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    /// The query these insights describe.
    pub query: String,
    /// Number of chunks returned.
    pub sources_found: usize,
    /// Total characters of chunk content.
    pub characters_analyzed: usize,
    /// Number of whitespace-separated words in the query.
    pub query_words: usize,
    /// Distinct sources, in first-seen order.
    pub unique_sources: Vec<String>,
    /// When the insights were computed.
    pub processed_at: DateTime<Local>,
}

impl Insights {
    /// Computes insights for `query` over `chunks`.
    #[must_use]
    pub fn compute(query: &str, chunks: &[Chunk]) -> Self {
        let mut unique_sources: Vec<String> = Vec::new();
        for chunk in chunks {
            let source = chunk.source().unwrap_or(UNKNOWN);
            if !unique_sources.iter().any(|s| s == source) {
                unique_sources.push(source.to_string());
            }
        }

        Self {
            query: query.to_string(),
            sources_found: chunks.len(),
            characters_analyzed: chunks.iter().map(Chunk::char_count).sum(),
            query_words: query.split_whitespace().count(),
            unique_sources,
            processed_at: Local::now(),
        }
    }

    /// The first few unique sources for an overview listing.
    #[must_use]
    pub fn sources_overview(&self) -> &[String] {
        let end = self.unique_sources.len().min(SOURCES_OVERVIEW_LIMIT);
        &self.unique_sources[..end]
    }
}
