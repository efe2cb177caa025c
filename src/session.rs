//! Interactive search session.
//!
//! A [`Session`] owns one retrieval agent for its whole lifetime along with
//! the query history and the most recent result. Queries run one at a time;
//! [`Session::submit`] takes `&mut self`.

use tracing::info;

use crate::agent::{AgentBackend, AgentHandle, AgentState, HttpAgent};
use crate::config::AppConfig;
use crate::core::{Insights, SearchHistory};
use crate::error::Result;
use crate::pipeline::{QueryOrchestrator, QueryOutcome};

/// The most recent query and what it produced.
#[derive(Debug, Clone)]
pub struct LastQuery {
    /// Query text as submitted.
    pub query: String,
    /// Result of running it.
    pub outcome: QueryOutcome,
}

/// A search session bound to one retrieval agent.
#[derive(Debug)]
pub struct Session {
    agent: AgentHandle,
    orchestrator: QueryOrchestrator,
    history: SearchHistory,
    last: Option<LastQuery>,
}

impl Session {
    /// Creates a session talking to the HTTP agent at `config.agent_url`.
    ///
    /// The agent is not contacted until the first query.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend = HttpAgent::new(&config.agent_url, config.agent_timeout)?;
        Ok(Self::with_backend(Box::new(backend), config))
    }

    /// Creates a session over an arbitrary agent backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn AgentBackend>, config: &AppConfig) -> Self {
        Self {
            agent: AgentHandle::new(backend, config.agent_timeout),
            orchestrator: QueryOrchestrator::new(config.heuristics.clone()),
            history: SearchHistory::new(config.history_capacity),
            last: None,
        }
    }

    /// Records `query` in the history, runs it, and keeps the outcome.
    ///
    /// The query is recorded before it runs, so failed queries appear in
    /// the history too. Blank queries are not recorded.
    pub async fn submit(&mut self, query: &str) -> &QueryOutcome {
        if !query.trim().is_empty() {
            self.history.push(query);
        }
        let outcome = self.orchestrator.run(&mut self.agent, query).await;
        let last = self.last.insert(LastQuery {
            query: query.to_string(),
            outcome,
        });
        &last.outcome
    }

    /// Re-runs the `n`th most recent history entry (1-based, newest first).
    ///
    /// Returns `None` if there is no such entry.
    pub async fn rerun(&mut self, n: usize) -> Option<&QueryOutcome> {
        let query = self.recent_entry(n)?.to_string();
        Some(self.submit(&query).await)
    }

    /// The `n`th most recent history entry (1-based, newest first).
    #[must_use]
    pub fn recent_entry(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.history.recent().get(i).copied())
    }

    /// Clears the history and the last result. The agent stays initialized.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last = None;
        info!("session reset");
    }

    /// Shuts the session down, releasing the agent.
    pub fn close(self) {
        info!(
            queries = self.history.len(),
            agent_state = %self.agent.state(),
            "session closed"
        );
    }

    /// Past queries.
    #[must_use]
    pub const fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// The most recent query and its outcome.
    #[must_use]
    pub const fn last(&self) -> Option<&LastQuery> {
        self.last.as_ref()
    }

    /// Statistics over the last result's chunks.
    #[must_use]
    pub fn insights(&self) -> Option<Insights> {
        self.last
            .as_ref()
            .map(|last| Insights::compute(&last.query, &last.outcome.rag_chunks))
    }

    /// Lifecycle state of the agent.
    #[must_use]
    pub const fn agent_state(&self) -> AgentState {
        self.agent.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawResponse;
    use crate::error::AgentError;
    use async_trait::async_trait;
    use serde_json::json;

    /// Backend echoing the query back as a single chunk.
    struct EchoBackend;

    #[async_trait]
    impl AgentBackend for EchoBackend {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn initialize(&self) -> std::result::Result<(), AgentError> {
            Ok(())
        }

        async fn send(&self, query: &str) -> std::result::Result<RawResponse, AgentError> {
            if query == "fail" {
                return Err(AgentError::Unreachable {
                    cause: "down".to_string(),
                });
            }
            let reply = json!({
                "search_results": format!("results for {query}"),
                "rag_analysis": [{
                    "content": format!("The retrieved passage talks about {query} at length."),
                    "metadata": {"source": "https://docs.example"}
                }]
            });
            Ok(RawResponse::from(reply.to_string()))
        }
    }

    fn session() -> Session {
        Session::with_backend(Box::new(EchoBackend), &AppConfig::default())
    }

    #[tokio::test]
    async fn test_submit_records_history_and_last() {
        let mut session = session();
        let outcome = session.submit("rust traits").await;
        assert_eq!(outcome.search_results, "results for rust traits");
        assert!(!outcome.is_degraded());

        assert_eq!(session.history().recent(), vec!["rust traits"]);
        assert_eq!(session.last().map(|l| l.query.as_str()), Some("rust traits"));
        assert_eq!(session.agent_state(), AgentState::Ready);
    }

    #[tokio::test]
    async fn test_failed_query_still_recorded() {
        let mut session = session();
        let outcome = session.submit("fail").await;
        assert!(outcome.is_degraded());
        assert!(session.history().contains("fail"));
    }

    #[tokio::test]
    async fn test_blank_query_not_recorded() {
        let mut session = session();
        assert!(session.submit("  ").await.is_degraded());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_rerun_newest_first() {
        let mut session = session();
        session.submit("first").await;
        session.submit("second").await;

        assert_eq!(session.recent_entry(1), Some("second"));
        assert_eq!(session.recent_entry(0), None);
        assert_eq!(session.recent_entry(3), None);

        let outcome = session.rerun(2).await.map(|o| o.search_results.clone());
        assert_eq!(outcome.as_deref(), Some("results for first"));
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_reset_keeps_agent() {
        let mut session = session();
        session.submit("q").await;
        session.reset();
        assert!(session.history().is_empty());
        assert!(session.last().is_none());
        assert!(session.insights().is_none());
        assert_eq!(session.agent_state(), AgentState::Ready);
    }

    #[tokio::test]
    async fn test_insights_from_last_result() {
        let mut session = session();
        session.submit("two words").await;
        let insights = session.insights().unwrap_or_else(|| unreachable!());
        assert_eq!(insights.sources_found, 1);
        assert_eq!(insights.query_words, 2);
        assert_eq!(insights.unique_sources, vec!["https://docs.example"]);
    }
}
