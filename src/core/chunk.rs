//! Retrieved document fragments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source label shown for chunks whose metadata carries no `source`.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// One retrieved document fragment returned by the agent.
///
/// Chunks are read-only once produced: the pipeline hands them back to
/// the caller unchanged alongside the composed analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Fragment text.
    #[serde(default)]
    pub content: String,
    /// Provenance metadata.
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

/// Metadata attached to a [`Chunk`].
///
/// Only `source` is interpreted; every other key the agent sends is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Where the fragment came from (usually a URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Remaining metadata fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Chunk {
    /// Creates a chunk with the given content and optional source.
    #[must_use]
    pub fn new(content: impl Into<String>, source: Option<&str>) -> Self {
        Self {
            content: content.into(),
            metadata: ChunkMetadata {
                source: source.map(str::to_string),
                extra: Map::new(),
            },
        }
    }

    /// Returns the raw source, if the agent provided one.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.metadata.source.as_deref()
    }

    /// Returns the source for display, substituting [`UNKNOWN_SOURCE`].
    #[must_use]
    pub fn display_source(&self) -> &str {
        self.source().unwrap_or(UNKNOWN_SOURCE)
    }

    /// Number of characters (Unicode scalar values) in the content.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
