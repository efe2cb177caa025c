//! Tunable lexical heuristics for key-point extraction and summaries.
//!
//! These filters are cheap noise reduction, not grammar: sentences are
//! split on a single delimiter character (so abbreviations, decimals, and
//! URLs are split too) and summaries are cut at the first clause delimiter.

/// Default sentence delimiter.
pub const DEFAULT_SENTENCE_DELIMITER: char = '.';
/// Default minimum sentence length. Sentences must be strictly longer.
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 20;
/// Default prefixes marking navigation or boilerplate text.
pub const DEFAULT_STOP_PREFIXES: [&str; 3] = ["Sign", "Open", "Listen"];
/// Default cap on key points taken from one chunk.
pub const DEFAULT_MAX_POINTS_PER_CHUNK: usize = 3;
/// Default cap on summary bullets.
pub const DEFAULT_MAX_SUMMARY_POINTS: usize = 3;
/// Default delimiter ending a summary bullet's leading clause.
pub const DEFAULT_SUMMARY_CLAUSE_DELIMITER: char = ',';

/// Thresholds and word lists used by the extractor and composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicConfig {
    /// Character that separates candidate sentences.
    pub sentence_delimiter: char,
    /// A trimmed sentence must have more characters than this.
    pub min_sentence_chars: usize,
    /// Case-sensitive prefixes that disqualify a sentence.
    pub stop_prefixes: Vec<String>,
    /// Maximum key points taken from each chunk.
    pub max_points_per_chunk: usize,
    /// Maximum key points echoed in the summary section.
    pub max_summary_points: usize,
    /// Summary bullets keep only the text before this character.
    pub summary_clause_delimiter: char,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            sentence_delimiter: DEFAULT_SENTENCE_DELIMITER,
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
            stop_prefixes: DEFAULT_STOP_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_points_per_chunk: DEFAULT_MAX_POINTS_PER_CHUNK,
            max_summary_points: DEFAULT_MAX_SUMMARY_POINTS,
            summary_clause_delimiter: DEFAULT_SUMMARY_CLAUSE_DELIMITER,
        }
    }
}

impl HeuristicConfig {
    /// Returns `true` if a trimmed sentence passes the length and prefix filters.
    #[must_use]
    pub fn is_meaningful(&self, sentence: &str) -> bool {
        sentence.chars().count() > self.min_sentence_chars
            && !self
                .stop_prefixes
                .iter()
                .any(|prefix| sentence.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("This is a meaningful sentence here", true ; "long sentence kept")]
    #[test_case("Short", false ; "short dropped")]
    #[test_case("exactly twenty chars", false ; "twenty chars dropped")]
    #[test_case("exactly twentyone chr", true ; "twenty one chars kept")]
    #[test_case("Sign in to continue reading this article", false ; "sign prefix")]
    #[test_case("Open the app to listen to the full story", false ; "open prefix")]
    #[test_case("Listen to this article in your browser now", false ; "listen prefix")]
    #[test_case("sign in to continue reading this article", true ; "prefix match is case sensitive")]
    #[test_case("Signals from the market were strongly positive", false ; "prefix is not word aware")]
    fn test_is_meaningful(sentence: &str, expected: bool) {
        assert_eq!(HeuristicConfig::default().is_meaningful(sentence), expected);
    }

    #[test]
    fn test_custom_prefixes() {
        let config = HeuristicConfig {
            stop_prefixes: vec!["Cookie".to_string()],
            ..HeuristicConfig::default()
        };
        assert!(!config.is_meaningful("Cookie settings for this website apply"));
        assert!(config.is_meaningful("Sign language is used by many people"));
    }
}
