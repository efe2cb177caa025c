//! Error types for IntelliSearch.
//!
//! Every stage of the query pipeline has its own error enum. The
//! [`QueryOrchestrator`](crate::pipeline::QueryOrchestrator) converts agent
//! and parse failures into a degraded result, so these only escape to the
//! caller through the fallible `try_*` entry points and the CLI layer.

use std::time::Duration;

use thiserror::Error;

use crate::agent::AgentState;

/// Result type alias for IntelliSearch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Retrieval agent lifecycle or transport error.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// Agent reply could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Text-completion (refinement) error.
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    /// CLI command error.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single pass through the query pipeline.
///
/// Wraps the stage errors without adding context so the degraded result
/// shows the stage's own message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query was blank.
    #[error("query cannot be empty")]
    EmptyQuery,

    /// The query exceeded the maximum accepted length.
    #[error("query exceeds maximum length ({len} bytes, max {max})")]
    TooLong {
        /// Query length in bytes.
        len: usize,
        /// Maximum accepted length in bytes.
        max: usize,
    },

    /// The agent could not be initialized or queried.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The agent reply could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors raised by the [`AgentHandle`](crate::agent::AgentHandle) and its backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The agent could not be brought to the `Ready` state.
    #[error("agent initialization failed: {cause}")]
    InitializationFailed {
        /// Underlying cause.
        cause: String,
    },

    /// The agent could not be reached (connection refused, bad status, ...).
    #[error("agent unreachable: {cause}")]
    Unreachable {
        /// Underlying cause.
        cause: String,
    },

    /// The agent did not answer within the caller-specified timeout.
    #[error("agent did not respond within {}s", elapsed.as_secs_f64())]
    Timeout {
        /// The timeout that elapsed.
        elapsed: Duration,
    },

    /// A query was sent before the agent finished initializing.
    #[error("agent is not ready (state: {state})")]
    NotReady {
        /// State the handle was in.
        state: AgentState,
    },
}

/// Errors raised while normalizing an agent reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A text reply was not valid JSON.
    #[error("malformed agent response: {excerpt}")]
    MalformedResponse {
        /// Leading portion of the offending reply.
        excerpt: String,
    },
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The agent URL could not be parsed.
    #[error("invalid agent URL '{url}': {reason}")]
    InvalidAgentUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A setting had an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors from the text-completion service used for narrative refinement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// No API key configured for the completion provider.
    #[error("completion API key not configured (set GROQ_API_KEY or OPENAI_API_KEY)")]
    ApiKeyMissing,

    /// The completion request failed.
    #[error("completion request failed: {message}")]
    ApiRequest {
        /// Provider error message.
        message: String,
    },

    /// The provider answered with no content.
    #[error("completion returned no content")]
    EmptyResponse,

    /// Narrative refinement was not compiled in.
    #[error("narrative refinement requires the `refine` feature")]
    Disabled,
}

/// CLI command errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid command argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
