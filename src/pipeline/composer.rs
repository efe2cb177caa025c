//! Assembly of key points into a markdown analysis document.
//!
//! The summary section reuses the first few key points cut at their first
//! clause delimiter. That truncation is best effort: a point whose comma
//! comes early produces a short or empty bullet, and no attempt is made to
//! keep the result grammatical.

use std::fmt::Write;

use serde::Serialize;

use crate::core::KeyPoint;

use super::heuristics::HeuristicConfig;

/// Notice rendered when no key points were extracted.
pub const NO_ANALYSIS_NOTICE: &str =
    "⚠️ No detailed analysis available for this query.\nPlease try refining your search terms.\n";

/// Line introducing the summary bullets.
const SUMMARY_INTRO: &str = "Based on the analyzed sources:";

/// Structured analysis for one query.
///
/// When no key points were found, `key_information` and `summary` are
/// empty and `notice` carries [`NO_ANALYSIS_NOTICE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisDocument {
    /// Document title, `Analysis: <query>`.
    pub heading: String,
    /// Numbered key points.
    pub key_information: Vec<KeyPoint>,
    /// Summary bullets, each ending in a period.
    pub summary: Vec<String>,
    /// Fixed notice for documents without key points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl AnalysisDocument {
    /// Returns `true` if this is the fixed no-analysis document.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.notice.is_some()
    }

    /// Renders the document as markdown.
    ///
    /// Sections appear in a fixed order: heading, key information, summary.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("# {}\n\n", self.heading);

        if let Some(notice) = self.notice {
            out.push('\n');
            out.push_str(notice);
            return out;
        }

        out.push_str("## Key Information\n\n");
        for (idx, kp) in self.key_information.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", idx + 1, kp.point);
            let _ = writeln!(out, "   *[Source]({})*\n", kp.source);
        }

        out.push_str("\n## Summary\n");
        out.push_str(SUMMARY_INTRO);
        out.push('\n');
        out.push_str(&self.summary.join("\n"));
        out
    }
}

/// Builds [`AnalysisDocument`]s from extracted key points.
#[derive(Debug, Clone, Default)]
pub struct AnalysisComposer {
    heuristics: HeuristicConfig,
}

impl AnalysisComposer {
    /// Creates a composer with the given heuristics.
    #[must_use]
    pub const fn new(heuristics: HeuristicConfig) -> Self {
        Self { heuristics }
    }

    /// Composes the analysis for `query`.
    #[must_use]
    pub fn compose(&self, query: &str, key_points: &[KeyPoint]) -> AnalysisDocument {
        let heading = format!("Analysis: {query}");

        if key_points.is_empty() {
            return AnalysisDocument {
                heading,
                key_information: Vec::new(),
                summary: Vec::new(),
                notice: Some(NO_ANALYSIS_NOTICE),
            };
        }

        let delimiter = self.heuristics.summary_clause_delimiter;
        let summary = key_points
            .iter()
            .take(self.heuristics.max_summary_points)
            .map(|kp| format!("- {}.", kp.leading_clause(delimiter)))
            .collect();

        AnalysisDocument {
            heading,
            key_information: key_points.to_vec(),
            summary,
            notice: None,
        }
    }
}
