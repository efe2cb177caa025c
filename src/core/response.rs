//! Agent reply shapes before and after normalization.

use serde::Serialize;
use serde_json::{Map, Value};

use super::chunk::Chunk;

/// Placeholder used when a well-shaped reply carries no `search_results`.
pub const NO_SEARCH_RESULTS: &str = "No search results";

/// Placeholder used when the reply is not a mapping at all.
pub const NO_RESULTS_AVAILABLE: &str = "No results available";

/// The agent's reply exactly as received.
///
/// Agents answer either with a structured mapping or with text, and the
/// text is usually (but not always) a JSON-encoded mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Plain or JSON-encoded text.
    Text(String),
    /// Structured mapping with optional `search_results` and `rag_analysis`.
    Mapping(Map<String, Value>),
}

impl RawResponse {
    /// Short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<String> for RawResponse {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawResponse {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for RawResponse {
    fn from(map: Map<String, Value>) -> Self {
        Self::Mapping(map)
    }
}

/// Canonical form of an agent reply.
///
/// `search_results` is never empty: absence is represented by
/// [`NO_SEARCH_RESULTS`] or [`NO_RESULTS_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    /// Raw web search results text.
    pub search_results: String,
    /// Retrieved document chunks, in agent order.
    pub rag_chunks: Vec<Chunk>,
}

impl NormalizedResponse {
    /// Response for a reply that was not a mapping.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            search_results: NO_RESULTS_AVAILABLE.to_string(),
            rag_chunks: Vec::new(),
        }
    }
}
