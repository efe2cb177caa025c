//! Query orchestration: dispatch → normalize → extract → compose.
//!
//! [`QueryOrchestrator::run`] never fails. Every stage error is logged and
//! replaced by a degraded outcome the caller can render as-is.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info};

use super::composer::{AnalysisComposer, AnalysisDocument};
use super::extractor::KeyPointExtractor;
use super::heuristics::HeuristicConfig;
use super::normalizer::normalize;
use crate::agent::AgentHandle;
use crate::core::{Chunk, KeyPoint};
use crate::error::QueryError;

/// Maximum accepted query length in bytes.
pub const MAX_QUERY_LEN: usize = 10_000;

/// Prefix of the search-results text in a degraded outcome.
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// Analysis text of a degraded outcome.
pub const ERROR_ANALYSIS: &str = "Error during analysis";

/// Everything one successful pass through the pipeline produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Web search results text.
    pub search_results: String,
    /// Key points extracted from the chunks.
    pub key_points: Vec<KeyPoint>,
    /// The structured analysis.
    pub document: AnalysisDocument,
    /// Retrieved chunks, unchanged.
    pub rag_chunks: Vec<Chunk>,
}

/// Renderable result of [`QueryOrchestrator::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    /// Web search results, or the error message when degraded.
    pub search_results: String,
    /// Markdown analysis, or [`ERROR_ANALYSIS`] when degraded.
    pub analysis_text: String,
    /// Retrieved chunks (empty when degraded).
    pub rag_chunks: Vec<Chunk>,
    /// Failure message when the pipeline failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryOutcome {
    /// The uniform placeholder result for a failed query.
    #[must_use]
    pub fn degraded(message: &str) -> Self {
        Self {
            search_results: format!("{ERROR_PREFIX}{message}"),
            analysis_text: ERROR_ANALYSIS.to_string(),
            rag_chunks: Vec::new(),
            error: Some(message.to_string()),
        }
    }

    /// Returns `true` if this is a degraded result.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Splits into `(search_results, analysis_text, rag_chunks)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, Vec<Chunk>) {
        (self.search_results, self.analysis_text, self.rag_chunks)
    }
}

impl From<AnalysisReport> for QueryOutcome {
    fn from(report: AnalysisReport) -> Self {
        Self {
            search_results: report.search_results,
            analysis_text: report.document.render(),
            rag_chunks: report.rag_chunks,
            error: None,
        }
    }
}

/// Runs queries through the retrieval agent and the synthesis pipeline.
///
/// Holds no per-query state. The agent is passed in by the session that
/// owns it; the `&mut` borrow keeps a second query from starting before
/// the first returns.
#[derive(Debug, Clone, Default)]
pub struct QueryOrchestrator {
    extractor: KeyPointExtractor,
    composer: AnalysisComposer,
}

impl QueryOrchestrator {
    /// Creates an orchestrator using `heuristics` for extraction and summaries.
    #[must_use]
    pub fn new(heuristics: HeuristicConfig) -> Self {
        Self {
            extractor: KeyPointExtractor::new(heuristics.clone()),
            composer: AnalysisComposer::new(heuristics),
        }
    }

    /// Runs `query`, converting any failure into a degraded outcome.
    pub async fn run(&self, agent: &mut AgentHandle, query: &str) -> QueryOutcome {
        match self.try_run(agent, query).await {
            Ok(report) => report.into(),
            Err(e) => {
                error!(query, error = %e, "query failed, returning degraded result");
                QueryOutcome::degraded(&e.to_string())
            }
        }
    }

    /// Runs `query` and returns the full report.
    ///
    /// # Steps
    ///
    /// 1. Initialize the agent unless it is already ready
    /// 2. Send the query
    /// 3. Normalize the reply
    /// 4. Extract key points and compose the analysis
    ///
    /// Nothing is kept from a failed pass.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for blank or oversized queries, agent
    /// failures, and unparsable replies.
    pub async fn try_run(
        &self,
        agent: &mut AgentHandle,
        query: &str,
    ) -> Result<AnalysisReport, QueryError> {
        if query.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        if query.len() > MAX_QUERY_LEN {
            return Err(QueryError::TooLong {
                len: query.len(),
                max: MAX_QUERY_LEN,
            });
        }

        let start = Instant::now();

        if !agent.is_ready() {
            agent.initialize().await?;
        }

        info!(query, "dispatching query to agent");
        let raw = agent.send(query).await?;
        debug!(kind = raw.kind(), "agent replied");

        let normalized = normalize(&raw)?;
        let key_points = self.extractor.extract(&normalized.rag_chunks);
        let document = self.composer.compose(query, &key_points);

        info!(
            query,
            chunks = normalized.rag_chunks.len(),
            key_points = key_points.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "query complete"
        );

        Ok(AnalysisReport {
            search_results: normalized.search_results,
            key_points,
            document,
            rag_chunks: normalized.rag_chunks,
        })
    }
}
