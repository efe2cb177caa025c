//! Completion agent trait.

use async_trait::async_trait;

use super::message::{ChatRequest, TokenUsage, system_message, user_message};
use super::provider::CompletionProvider;
use crate::error::CompletionError;

/// Response from a completion agent.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// Generated text.
    pub content: String,
    /// Token usage for this call.
    pub usage: TokenUsage,
    /// Why the model stopped generating.
    pub finish_reason: Option<String>,
}

/// A fixed role (system prompt, model, sampling settings) run against a
/// [`CompletionProvider`].
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Agent name for logging.
    fn name(&self) -> &'static str;

    /// Model identifier.
    fn model(&self) -> &str;

    /// Optional system prompt sent ahead of the user message.
    fn system_prompt(&self) -> Option<&str> {
        None
    }

    /// Sampling temperature.
    fn temperature(&self) -> f32 {
        0.0
    }

    /// Maximum tokens for the response.
    fn max_tokens(&self) -> u32 {
        2048
    }

    /// Runs the agent with `user_msg`.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::ApiRequest`] on provider failures and
    /// [`CompletionError::EmptyResponse`] if the model produced no text.
    async fn execute(
        &self,
        provider: &dyn CompletionProvider,
        user_msg: &str,
    ) -> Result<AgentResponse, CompletionError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.system_prompt() {
            messages.push(system_message(system));
        }
        messages.push(user_message(user_msg));

        let request = ChatRequest {
            model: self.model().to_string(),
            messages,
            temperature: Some(self.temperature()),
            max_tokens: Some(self.max_tokens()),
        };

        let response = provider.chat(&request).await?;
        if response.content.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        Ok(AgentResponse {
            content: response.content,
            usage: response.usage,
            finish_reason: response.finish_reason,
        })
    }
}
