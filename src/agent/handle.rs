//! Lifecycle management for the external retrieval agent.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::backend::AgentBackend;
use crate::core::RawResponse;
use crate::error::AgentError;

/// Lifecycle state of an [`AgentHandle`].
///
/// ```text
/// Uninitialized ──initialize()──▶ Initializing ──ok──▶ Ready
///                                      │
///                                      └──err──▶ Failed ──initialize()──▶ Initializing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    /// No initialization attempted yet.
    Uninitialized,
    /// Initialization in progress.
    Initializing,
    /// Ready to accept queries.
    Ready,
    /// Last initialization attempt failed.
    Failed,
}

impl AgentState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-owned handle to the retrieval agent.
///
/// Methods that change state take `&mut self`, so a session can only have
/// one initialization or query in flight at a time.
pub struct AgentHandle {
    backend: Box<dyn AgentBackend>,
    state: AgentState,
    timeout: Duration,
}

impl AgentHandle {
    /// Wraps `backend`, applying `timeout` to every agent call.
    #[must_use]
    pub fn new(backend: Box<dyn AgentBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            state: AgentState::Uninitialized,
            timeout,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AgentState {
        self.state
    }

    /// Returns `true` once initialization has succeeded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == AgentState::Ready
    }

    /// Brings the agent to the `Ready` state.
    ///
    /// Returns immediately when already ready, without contacting the
    /// agent. A failed attempt leaves the handle in `Failed`; calling again
    /// retries.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InitializationFailed`] if the backend fails or
    /// does not answer within the timeout.
    pub async fn initialize(&mut self) -> Result<(), AgentError> {
        if self.is_ready() {
            return Ok(());
        }

        self.state = AgentState::Initializing;
        let outcome = match tokio::time::timeout(self.timeout, self.backend.initialize()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(AgentError::InitializationFailed { cause })) => {
                Err(AgentError::InitializationFailed { cause })
            }
            Ok(Err(e)) => Err(AgentError::InitializationFailed {
                cause: e.to_string(),
            }),
            Err(_) => Err(AgentError::InitializationFailed {
                cause: format!("no response within {}s", self.timeout.as_secs_f64()),
            }),
        };

        match &outcome {
            Ok(()) => {
                self.state = AgentState::Ready;
                info!(backend = self.backend.name(), "agent initialized");
            }
            Err(e) => {
                self.state = AgentState::Failed;
                warn!(backend = self.backend.name(), error = %e, "agent initialization failed");
            }
        }
        outcome
    }

    /// Sends `query` to a ready agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotReady`] if [`initialize`](Self::initialize)
    /// has not succeeded, [`AgentError::Timeout`] if the agent does not
    /// answer in time, or the backend's transport error.
    pub async fn send(&mut self, query: &str) -> Result<RawResponse, AgentError> {
        if !self.is_ready() {
            return Err(AgentError::NotReady { state: self.state });
        }

        tokio::time::timeout(self.timeout, self.backend.send(query))
            .await
            .map_err(|_| AgentError::Timeout {
                elapsed: self.timeout,
            })?
    }
}

impl fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentHandle")
            .field("backend", &self.backend.name())
            .field("state", &self.state)
            .field("timeout", &self.timeout)
            .finish()
    }
}
