//! `OpenAI`-compatible provider using the `async-openai` crate.
//!
//! Works against any API following the `OpenAI` chat completion contract
//! (Groq, `OpenAI`, local proxies) via the base URL in [`AppConfig`].

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_trait::async_trait;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::CompletionError;
use crate::refine::message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
use crate::refine::provider::CompletionProvider;

/// `OpenAI`-compatible completion provider.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiProvider {
    /// Creates a provider for `api_key` using the configured base URL.
    #[must_use]
    pub fn new(config: &AppConfig, api_key: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.completion_base_url);

        Self {
            client: Client::with_config(openai_config),
        }
    }

    fn convert_message(msg: &ChatMessage) -> ChatCompletionRequestMessage {
        match msg.role {
            Role::System => {
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(msg.content.clone()),
                    name: None,
                })
            }
            Role::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                name: None,
            }),
        }
    }

    fn build_request(request: &ChatRequest) -> CreateChatCompletionRequest {
        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages: request.messages.iter().map(Self::convert_message).collect(),
            temperature: request.temperature,
            max_completion_tokens: request.max_tokens,
            ..Default::default()
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("client", &"<async-openai::Client>")
            .finish()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, CompletionError> {
        let response = self
            .client
            .chat()
            .create(Self::build_request(request))
            .await
            .map_err(|e| CompletionError::ApiRequest {
                message: e.to_string(),
            })?;

        let choice = response.choices.first();
        let content = choice
            .and_then(|c| c.message.content.as_ref())
            .cloned()
            .unwrap_or_default();
        let finish_reason = choice.and_then(|c| {
            c.finish_reason
                .as_ref()
                .map(|fr| format!("{fr:?}").to_lowercase())
        });
        let usage = response
            .usage
            .map_or_else(TokenUsage::default, |u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            });

        debug!(
            model = %request.model,
            total_tokens = usage.total_tokens,
            finish_reason = finish_reason.as_deref().unwrap_or("unknown"),
            "completion received"
        );

        Ok(ChatResponse {
            content,
            usage,
            finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::message::{system_message, user_message};

    #[test]
    fn test_convert_messages() {
        assert!(matches!(
            OpenAiProvider::convert_message(&system_message("s")),
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            OpenAiProvider::convert_message(&user_message("u")),
            ChatCompletionRequestMessage::User(_)
        ));
    }

    #[test]
    fn test_build_request_carries_sampling_settings() {
        let request = ChatRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![user_message("QUESTION: q")],
            temperature: Some(0.5),
            max_tokens: Some(2000),
        };
        let built = OpenAiProvider::build_request(&request);
        assert_eq!(built.model, "llama-3.1-8b-instant");
        assert_eq!(built.messages.len(), 1);
        assert_eq!(built.temperature, Some(0.5));
        assert_eq!(built.max_completion_tokens, Some(2000));
        assert!(built.stream.is_none());
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAiProvider::new(&AppConfig::default(), "key");
        assert_eq!(provider.name(), "openai");
    }
}
