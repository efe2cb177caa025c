//! HTTP retrieval agent backend using `reqwest`.
//!
//! The agent is expected to expose two endpoints:
//!
//! - `POST {base}/initialize` - prepares the agent; any 2xx status is success.
//! - `POST {base}/query` with body `{"query": "..."}` - answers a query.
//!
//! Query replies are passed through as [`RawResponse`]: a JSON object
//! becomes a mapping, a JSON string is unwrapped to its text (agents often
//! JSON-encode their reply twice), and anything else is kept as raw text
//! for the normalizer to judge.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::backend::AgentBackend;
use crate::core::RawResponse;
use crate::error::AgentError;

/// Path of the initialization endpoint.
const INITIALIZE_PATH: &str = "initialize";
/// Path of the query endpoint.
const QUERY_PATH: &str = "query";
/// Characters of an error body quoted in error messages.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

/// Agent reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAgent {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAgent {
    /// Creates a backend for the agent at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Unreachable`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Unreachable {
                cause: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn transport_error(&self, e: &reqwest::Error) -> AgentError {
        if e.is_timeout() {
            AgentError::Timeout {
                elapsed: self.timeout,
            }
        } else {
            AgentError::Unreachable {
                cause: e.to_string(),
            }
        }
    }

    /// Fails with the status and a body excerpt unless the status is 2xx.
    async fn check_status(response: Response) -> Result<Response, AgentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        Err(AgentError::Unreachable {
            cause: format!("HTTP {status}: {excerpt}"),
        })
    }
}

/// Interprets a reply body as a [`RawResponse`].
pub(crate) fn decode_reply(body: String) -> RawResponse {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map.into(),
        Ok(Value::String(inner)) => inner.into(),
        _ => body.into(),
    }
}

#[async_trait]
impl AgentBackend for HttpAgent {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn initialize(&self) -> Result<(), AgentError> {
        let response = self
            .client
            .post(self.endpoint(INITIALIZE_PATH))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn send(&self, query: &str) -> Result<RawResponse, AgentError> {
        let response = self
            .client
            .post(self.endpoint(QUERY_PATH))
            .json(&QueryBody { query })
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;
        let response = Self::check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let raw = decode_reply(body);
        debug!(kind = raw.kind(), "received agent reply");
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let raw = decode_reply(r#"{"search_results": "x"}"#.to_string());
        assert_eq!(raw.kind(), "mapping");
    }

    #[test]
    fn test_decode_json_encoded_string() {
        let raw = decode_reply(r#""{\"search_results\": \"x\"}""#.to_string());
        assert_eq!(raw, RawResponse::Text(r#"{"search_results": "x"}"#.to_string()));
    }

    #[test]
    fn test_decode_plain_text() {
        let raw = decode_reply("not json".to_string());
        assert_eq!(raw, RawResponse::Text("not json".to_string()));
    }

    #[test]
    fn test_decode_other_json_kept_verbatim() {
        let raw = decode_reply("[1, 2]".to_string());
        assert_eq!(raw, RawResponse::Text("[1, 2]".to_string()));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let agent = HttpAgent::new("http://localhost:8000/", Duration::from_secs(1))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(agent.endpoint("query"), "http://localhost:8000/query");
    }
}
