//! Pluggable retrieval agent trait.
//!
//! Implementations translate the initialize/send contract into a concrete
//! transport. [`AgentHandle`](super::AgentHandle) layers lifecycle state and
//! timeouts on top, so backends stay stateless from the caller's view.

use async_trait::async_trait;

use crate::core::RawResponse;
use crate::error::AgentError;

/// Trait for retrieval agent backends.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Backend name (e.g., `"http"`).
    fn name(&self) -> &'static str;

    /// Prepares the agent for queries (loads tools, builds indexes, ...).
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if the agent cannot be prepared.
    async fn initialize(&self) -> Result<(), AgentError>;

    /// Sends a query and returns the agent's reply unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Unreachable`] on transport failures and
    /// [`AgentError::Timeout`] when the transport gives up waiting.
    async fn send(&self, query: &str) -> Result<RawResponse, AgentError>;
}
