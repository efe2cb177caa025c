//! Narrative refinement of a composed analysis.
//!
//! Refinement is optional and sits outside the core pipeline: a failure here
//! is reported to the user but never changes the query outcome it was
//! derived from.

use async_trait::async_trait;
use tracing::{info, warn};

use super::prompt::build_refine_prompt;
use super::provider::CompletionProvider;
use super::traits::CompletionAgent;
use crate::config::AppConfig;
use crate::error::CompletionError;

/// Agent rewriting an analysis into a readable markdown answer.
#[derive(Debug, Clone)]
pub struct RefinerAgent {
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl RefinerAgent {
    /// Creates a refiner using the completion settings in `config`.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            model: config.completion_model.clone(),
            temperature: config.completion_temperature,
            max_tokens: config.completion_max_tokens,
        }
    }

    /// Produces a narrative answer to `query` from `analysis`.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] if the provider fails or returns nothing.
    pub async fn refine(
        &self,
        provider: &dyn CompletionProvider,
        query: &str,
        analysis: &str,
    ) -> Result<String, CompletionError> {
        let prompt = build_refine_prompt(query, analysis);
        match self.execute(provider, &prompt).await {
            Ok(response) => {
                info!(
                    provider = provider.name(),
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
                    "analysis refined"
                );
                Ok(response.content)
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "refinement failed");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CompletionAgent for RefinerAgent {
    fn name(&self) -> &'static str {
        "refiner"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}
