//! Pluggable text-completion provider trait.

use async_trait::async_trait;

use super::message::{ChatRequest, ChatResponse};
use crate::error::CompletionError;

/// A chat completion backend.
///
/// Implementations own transport and authentication. No retry is done at
/// this layer; the caller decides whether to try again.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., `"openai"`).
    fn name(&self) -> &'static str;

    /// Executes a chat completion request.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::ApiRequest`] on transport or API failures.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, CompletionError>;
}
