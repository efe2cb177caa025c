//! Application configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::time::Duration;

use crate::core::DEFAULT_HISTORY_CAPACITY;
use crate::error::ConfigError;
use crate::pipeline::HeuristicConfig;

/// Default retrieval agent URL.
const DEFAULT_AGENT_URL: &str = "http://127.0.0.1:8000";
/// Default agent timeout in seconds.
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 120;
/// Default OpenAI-compatible completion endpoint (Groq).
const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default completion model.
const DEFAULT_COMPLETION_MODEL: &str = "llama-3.1-8b-instant";
/// Default sampling temperature for narrative refinement.
const DEFAULT_COMPLETION_TEMPERATURE: f32 = 0.5;
/// Default completion max tokens.
const DEFAULT_COMPLETION_MAX_TOKENS: u32 = 2000;

/// Configuration for a search session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the retrieval agent.
    pub agent_url: String,
    /// Timeout applied to agent initialization and queries.
    pub agent_timeout: Duration,
    /// API key for the text-completion service (refinement only).
    pub completion_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible completion API.
    pub completion_base_url: String,
    /// Completion model identifier.
    pub completion_model: String,
    /// Completion sampling temperature.
    pub completion_temperature: f32,
    /// Maximum tokens for the refined narrative.
    pub completion_max_tokens: u32,
    /// Number of past queries kept per session.
    pub history_capacity: usize,
    /// Key-point and summary heuristics.
    pub heuristics: HeuristicConfig,
}

impl AppConfig {
    /// Creates a new builder for `AppConfig`.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an environment value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env().build()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent_url: DEFAULT_AGENT_URL.to_string(),
            agent_timeout: Duration::from_secs(DEFAULT_AGENT_TIMEOUT_SECS),
            completion_api_key: None,
            completion_base_url: DEFAULT_COMPLETION_BASE_URL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            completion_temperature: DEFAULT_COMPLETION_TEMPERATURE,
            completion_max_tokens: DEFAULT_COMPLETION_MAX_TOKENS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            heuristics: HeuristicConfig::default(),
        }
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    agent_url: Option<String>,
    agent_timeout: Option<Duration>,
    agent_timeout_raw: Option<String>,
    completion_api_key: Option<String>,
    completion_base_url: Option<String>,
    completion_model: Option<String>,
    completion_temperature: Option<f32>,
    completion_max_tokens: Option<u32>,
    history_capacity: Option<usize>,
    heuristics: Option<HeuristicConfig>,
}

impl AppConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.agent_url.is_none() {
            self.agent_url = std::env::var("INTELLISEARCH_AGENT_URL").ok();
        }
        if self.agent_timeout.is_none() {
            self.agent_timeout_raw = std::env::var("INTELLISEARCH_AGENT_TIMEOUT_SECS").ok();
        }
        if self.completion_api_key.is_none() {
            self.completion_api_key = std::env::var("GROQ_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok();
        }
        if self.completion_base_url.is_none() {
            self.completion_base_url = std::env::var("INTELLISEARCH_COMPLETION_BASE_URL").ok();
        }
        if self.completion_model.is_none() {
            self.completion_model = std::env::var("INTELLISEARCH_COMPLETION_MODEL").ok();
        }
        self
    }

    /// Sets the agent base URL.
    #[must_use]
    pub fn agent_url(mut self, url: impl Into<String>) -> Self {
        self.agent_url = Some(url.into());
        self
    }

    /// Sets the agent timeout.
    #[must_use]
    pub fn agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = Some(timeout);
        self.agent_timeout_raw = None;
        self
    }

    /// Sets the completion API key.
    #[must_use]
    pub fn completion_api_key(mut self, key: impl Into<String>) -> Self {
        self.completion_api_key = Some(key.into());
        self
    }

    /// Sets the completion base URL.
    #[must_use]
    pub fn completion_base_url(mut self, url: impl Into<String>) -> Self {
        self.completion_base_url = Some(url.into());
        self
    }

    /// Sets the completion model.
    #[must_use]
    pub fn completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = Some(model.into());
        self
    }

    /// Sets the completion temperature.
    #[must_use]
    pub const fn completion_temperature(mut self, temperature: f32) -> Self {
        self.completion_temperature = Some(temperature);
        self
    }

    /// Sets the completion max tokens.
    #[must_use]
    pub const fn completion_max_tokens(mut self, n: u32) -> Self {
        self.completion_max_tokens = Some(n);
        self
    }

    /// Sets the history capacity.
    #[must_use]
    pub const fn history_capacity(mut self, n: usize) -> Self {
        self.history_capacity = Some(n);
        self
    }

    /// Sets the extraction and summary heuristics.
    #[must_use]
    pub fn heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.heuristics = Some(heuristics);
        self
    }

    /// Builds the [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAgentUrl`] if the agent URL is not an
    /// absolute URL, or [`ConfigError::InvalidValue`] for an unparsable
    /// timeout or a zero history capacity.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();

        let agent_url = self.agent_url.unwrap_or(defaults.agent_url);
        reqwest::Url::parse(&agent_url).map_err(|e| ConfigError::InvalidAgentUrl {
            url: agent_url.clone(),
            reason: e.to_string(),
        })?;

        let agent_timeout = match (self.agent_timeout, self.agent_timeout_raw) {
            (Some(timeout), _) => timeout,
            (None, Some(raw)) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidValue {
                    key: "INTELLISEARCH_AGENT_TIMEOUT_SECS",
                    value: raw,
                })?,
            (None, None) => defaults.agent_timeout,
        };

        let history_capacity = self.history_capacity.unwrap_or(defaults.history_capacity);
        if history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history_capacity",
                value: "0".to_string(),
            });
        }

        Ok(AppConfig {
            agent_url,
            agent_timeout,
            completion_api_key: self.completion_api_key.filter(|k| !k.trim().is_empty()),
            completion_base_url: self
                .completion_base_url
                .unwrap_or(defaults.completion_base_url),
            completion_model: self.completion_model.unwrap_or(defaults.completion_model),
            completion_temperature: self
                .completion_temperature
                .unwrap_or(defaults.completion_temperature),
            completion_max_tokens: self
                .completion_max_tokens
                .unwrap_or(defaults.completion_max_tokens),
            history_capacity,
            heuristics: self.heuristics.unwrap_or(defaults.heuristics),
        })
    }
}
