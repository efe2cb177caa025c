//! Bounded, deduplicated list of past queries.

use std::collections::VecDeque;

use serde::Serialize;

/// Default number of queries kept in the history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Number of entries shown in the recent-searches list.
const RECENT_LIMIT: usize = 5;

/// Characters of a query shown in a recent-searches label.
const LABEL_CHARS: usize = 30;

/// Ordered list of distinct past queries.
///
/// Insertion order is preserved. A query already present is not
/// re-appended, and once the capacity is exceeded the oldest entry is
/// evicted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    #[serde(skip)]
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SearchHistory {
    /// Creates an empty history holding at most `capacity` queries.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends `query` unless it is already present.
    ///
    /// Returns `true` if the query was added.
    pub fn push(&mut self, query: &str) -> bool {
        if self.contains(query) {
            return false;
        }
        self.entries.push_back(query.to_string());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        true
    }

    /// Returns `true` if `query` is in the history.
    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.entries.iter().any(|q| q == query)
    }

    /// Number of stored queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no queries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored queries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The five most recent queries, newest first.
    #[must_use]
    pub fn recent(&self) -> Vec<&str> {
        self.iter().rev().take(RECENT_LIMIT).collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Short label for a history entry: 30 characters followed by `...`.
    #[must_use]
    pub fn label(query: &str) -> String {
        let head: String = query.chars().take(LABEL_CHARS).collect();
        format!("{head}...")
    }
}
