//! Extracted sentences used as analysis building blocks.

use serde::{Deserialize, Serialize};

/// A single meaningful sentence attributed to the chunk it came from.
///
/// Rebuilt on every query; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// The trimmed sentence text.
    pub point: String,
    /// Source of the originating chunk (empty when the chunk had none).
    pub source: String,
}

impl KeyPoint {
    /// Creates a key point.
    #[must_use]
    pub fn new(point: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            source: source.into(),
        }
    }

    /// Text before the first occurrence of `delimiter`.
    ///
    /// Returns the whole point when the delimiter is absent, and an empty
    /// string when the point starts with it.
    #[must_use]
    pub fn leading_clause(&self, delimiter: char) -> &str {
        self.point
            .split_once(delimiter)
            .map_or(self.point.as_str(), |(head, _)| head)
    }
}
