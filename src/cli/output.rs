//! Output formatting for CLI commands.
//!
//! Text output is plain markdown meant for a terminal; JSON output carries
//! the same data for scripting.

// Allow certain patterns that improve readability in CLI output formatting
#![allow(clippy::format_push_string)]

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::{Chunk, Insights, NO_RESULTS_AVAILABLE, SearchHistory};
use crate::error::{CommandError, Result};
use crate::pipeline::QueryOutcome;

/// Prefix some agents put in front of their web results.
pub const SEARCH_RESULTS_PREFIX: &str = "Search Results:";

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable markdown.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// One compact JSON document per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses a format name, falling back to [`OutputFormat::Text`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }

    /// Serializes `value` in this format's JSON style, newline-terminated.
    #[must_use]
    pub fn to_json<T: Serialize>(self, value: &T) -> String {
        let json = match self {
            Self::Ndjson => serde_json::to_string(value),
            Self::Text | Self::Json => serde_json::to_string_pretty(value),
        };
        let mut out = json.unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#));
        out.push('\n');
        out
    }
}

/// Removes one leading [`SEARCH_RESULTS_PREFIX`] and surrounding whitespace.
#[must_use]
pub fn strip_search_results_prefix(text: &str) -> &str {
    text.strip_prefix(SEARCH_RESULTS_PREFIX)
        .unwrap_or(text)
        .trim()
}

/// Optional sections rendered after the analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extras<'a> {
    /// Print every retrieved chunk.
    pub show_chunks: bool,
    /// Search statistics.
    pub insights: Option<&'a Insights>,
    /// Narrative answer from refinement.
    pub refined: Option<&'a str>,
    /// Refinement failure message.
    pub refine_error: Option<&'a str>,
    /// Where the analysis was saved.
    pub saved_to: Option<&'a Path>,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    #[serde(flatten)]
    outcome: &'a QueryOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<&'a Insights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refined: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refine_error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<&'a Path>,
}

/// Formats the result of one query.
#[must_use]
pub fn format_outcome(
    query: &str,
    outcome: &QueryOutcome,
    extras: &Extras<'_>,
    format: OutputFormat,
) -> String {
    if format != OutputFormat::Text {
        return format.to_json(&QueryReport {
            query,
            outcome,
            insights: extras.insights,
            refined: extras.refined,
            refine_error: extras.refine_error,
            saved_to: extras.saved_to,
        });
    }

    let mut out = String::new();
    out.push_str(&format_search_results(&outcome.search_results));
    out.push('\n');
    out.push_str(&outcome.analysis_text);
    if !outcome.analysis_text.ends_with('\n') {
        out.push('\n');
    }

    if extras.show_chunks {
        out.push('\n');
        out.push_str(&format_chunks(&outcome.rag_chunks));
    }
    if let Some(insights) = extras.insights {
        out.push('\n');
        out.push_str(&format_insights(insights));
    }
    if let Some(refined) = extras.refined {
        out.push_str("\n## Refined Answer\n\n");
        out.push_str(refined.trim_end());
        out.push('\n');
    }
    if let Some(err) = extras.refine_error {
        let _ = writeln!(out, "\n⚠️ Refinement failed: {err}");
    }
    if let Some(path) = extras.saved_to {
        let _ = writeln!(out, "\n📥 Analysis saved to {}", path.display());
    }
    out
}

/// Formats the web results section.
#[must_use]
pub fn format_search_results(search_results: &str) -> String {
    let body = strip_search_results_prefix(search_results);
    if search_results == NO_RESULTS_AVAILABLE || body.is_empty() {
        return "## Search Results\n\n🚫 No search results available for this query\n".to_string();
    }
    format!("## Search Results\n\n{body}\n")
}

/// Formats retrieved chunks with their source and length.
#[must_use]
pub fn format_chunks(chunks: &[Chunk]) -> String {
    if chunks.is_empty() {
        return "📭 No document chunks available for this query\n".to_string();
    }

    let mut out = format!("## Documents\n\n📊 Found {} document chunks\n", chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = write!(
            out,
            "\n### Document {}: {}\nContent Length: {} characters\n\n{}\n",
            i + 1,
            chunk.display_source(),
            chunk.char_count(),
            chunk.content.trim_end()
        );
    }
    out
}

/// Formats search statistics.
#[must_use]
pub fn format_insights(insights: &Insights) -> String {
    let mut out = String::from("## Insights\n\n");
    let _ = writeln!(out, "Sources Found:       {}", insights.sources_found);
    let _ = writeln!(
        out,
        "Characters Analyzed: {}",
        group_thousands(insights.characters_analyzed)
    );
    let _ = writeln!(out, "Query Length:        {} words", insights.query_words);
    let _ = writeln!(out, "Unique Sources:      {}", insights.unique_sources.len());
    let _ = writeln!(
        out,
        "Processed At:        {}",
        insights.processed_at.format("%Y-%m-%d %H:%M:%S")
    );
    out.push('\n');
    out.push_str(&format_sources(insights));
    out
}

/// Formats the top sources of a search.
#[must_use]
pub fn format_sources(insights: &Insights) -> String {
    let overview = insights.sources_overview();
    if overview.is_empty() {
        return "No sources.\n".to_string();
    }
    let mut out = String::from("Top Sources:\n");
    for (i, source) in overview.iter().enumerate() {
        let _ = writeln!(out, "  {}. {source}", i + 1);
    }
    out
}

/// Formats the recent-searches list, newest first, numbered from 1.
#[must_use]
pub fn format_history(history: &SearchHistory, format: OutputFormat) -> String {
    let recent = history.recent();
    if format != OutputFormat::Text {
        return format.to_json(&recent);
    }
    if recent.is_empty() {
        return "No recent searches.\n".to_string();
    }
    let mut out = String::from("Recent Searches:\n");
    for (i, query) in recent.iter().enumerate() {
        let _ = writeln!(out, "  :{} 🔍 {}", i + 1, SearchHistory::label(query));
    }
    out
}

/// Default file name for a saved analysis, stamped with `now`.
#[must_use]
pub fn default_save_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "intellisearch_analysis_{}.md",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Writes `analysis` to `path`, or to a timestamped default file.
///
/// # Errors
///
/// Returns [`CommandError::ExecutionFailed`] if the file cannot be written.
pub fn save_analysis(path: Option<&Path>, analysis: &str) -> Result<PathBuf> {
    let path = path.map_or_else(|| default_save_path(Local::now()), Path::to_path_buf);
    std::fs::write(&path, analysis).map_err(|e| {
        CommandError::ExecutionFailed(format!("failed to save analysis to {}: {e}", path.display()))
    })?;
    Ok(path)
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case("json", OutputFormat::Json)]
    #[test_case("NDJSON", OutputFormat::Ndjson)]
    #[test_case("text", OutputFormat::Text)]
    #[test_case("yaml", OutputFormat::Text)]
    fn test_format_parse(input: &str, expected: OutputFormat) {
        assert_eq!(OutputFormat::parse(input), expected);
    }

    #[test_case("Search Results: A. B.", "A. B."; "prefixed")]
    #[test_case("Search Results:Search Results: x", "Search Results: x"; "only one prefix removed")]
    #[test_case("  plain text ", "plain text"; "unprefixed")]
    fn test_strip_prefix(input: &str, expected: &str) {
        assert_eq!(strip_search_results_prefix(input), expected);
    }

    #[test_case(0, "0")]
    #[test_case(999, "999")]
    #[test_case(1000, "1,000")]
    #[test_case(1_234_567, "1,234,567")]
    fn test_group_thousands(n: usize, expected: &str) {
        assert_eq!(group_thousands(n), expected);
    }

    #[test]
    fn test_placeholder_results_render_warning() {
        let out = format_search_results(NO_RESULTS_AVAILABLE);
        assert!(out.contains("No search results available for this query"));
        let out = format_search_results("Search Results: hello");
        assert!(out.ends_with("\n\nhello\n"));
    }

    #[test]
    fn test_format_outcome_text() {
        let outcome = QueryOutcome {
            search_results: "Search Results: web".to_string(),
            analysis_text: "# Analysis: q\n\n".to_string(),
            rag_chunks: vec![Chunk::new("body text", Some("https://x"))],
            error: None,
        };
        let extras = Extras {
            show_chunks: true,
            refined: Some("narrative"),
            ..Extras::default()
        };
        let out = format_outcome("q", &outcome, &extras, OutputFormat::Text);
        assert!(out.starts_with("## Search Results\n\nweb\n"));
        assert!(out.contains("# Analysis: q"));
        assert!(out.contains("### Document 1: https://x\nContent Length: 9 characters"));
        assert!(out.contains("## Refined Answer\n\nnarrative\n"));
    }

    #[test]
    fn test_format_outcome_json() {
        let outcome = QueryOutcome::degraded("boom");
        let out = format_outcome("q", &outcome, &Extras::default(), OutputFormat::Json);
        let value: serde_json::Value =
            serde_json::from_str(&out).unwrap_or_else(|_| unreachable!());
        assert_eq!(value["query"], "q");
        assert_eq!(value["search_results"], "An error occurred: boom");
        assert_eq!(value["analysis_text"], "Error during analysis");
        assert_eq!(value["error"], "boom");
        assert!(value.get("insights").is_none());
    }

    #[test]
    fn test_format_chunks_unknown_source() {
        let out = format_chunks(&[Chunk::new("x", None)]);
        assert!(out.contains("Document 1: Unknown Source"));
        assert_eq!(
            format_chunks(&[]),
            "📭 No document chunks available for this query\n"
        );
    }

    #[test]
    fn test_format_history_labels() {
        let mut history = SearchHistory::default();
        history.push("first");
        history.push("a very long query that goes well past thirty characters");
        let out = format_history(&history, OutputFormat::Text);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "  :1 🔍 a very long query that goes we...");
        assert_eq!(lines[2], "  :2 🔍 first...");
    }

    #[test]
    fn test_format_insights() {
        let chunks: Vec<Chunk> = (0..7)
            .map(|i| Chunk::new("x".repeat(300), Some(format!("https://s{i}").as_str())))
            .collect();
        let insights = Insights::compute("rust async", &chunks);
        let out = format_insights(&insights);
        assert!(out.contains("Sources Found:       7"));
        assert!(out.contains("Characters Analyzed: 2,100"));
        assert!(out.contains("Query Length:        2 words"));
        assert!(out.contains("  5. https://s4"));
        assert!(!out.contains("https://s5"));
    }

    #[test]
    fn test_default_save_path() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(
            default_save_path(now),
            PathBuf::from("intellisearch_analysis_20240309_140507.md")
        );
    }

    #[test]
    fn test_save_analysis_to_path() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
        let path = dir.path().join("analysis.md");
        let saved =
            save_analysis(Some(&path), "# Analysis: q\n").unwrap_or_else(|_| unreachable!());
        assert_eq!(saved, path);
        let content = std::fs::read_to_string(&path).unwrap_or_else(|_| unreachable!());
        assert_eq!(content, "# Analysis: q\n");
    }

    #[test]
    fn test_save_analysis_unwritable() {
        let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
        let path = dir.path().join("missing").join("analysis.md");
        assert!(save_analysis(Some(&path), "x").is_err());
    }
}
