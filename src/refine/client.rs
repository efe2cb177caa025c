//! Provider factory.

use crate::config::AppConfig;
use crate::error::CompletionError;
use crate::refine::provider::CompletionProvider;

/// Creates the completion provider described by `config`.
///
/// # Errors
///
/// Returns [`CompletionError::ApiKeyMissing`] when no API key is configured,
/// or [`CompletionError::Disabled`] when built without the `refine` feature.
#[cfg(feature = "refine")]
pub fn create_provider(config: &AppConfig) -> Result<Box<dyn CompletionProvider>, CompletionError> {
    let key = config
        .completion_api_key
        .as_deref()
        .ok_or(CompletionError::ApiKeyMissing)?;
    Ok(Box::new(super::providers::OpenAiProvider::new(config, key)))
}

/// Creates the completion provider described by `config`.
///
/// # Errors
///
/// Always returns [`CompletionError::Disabled`]: this build has no
/// completion backend.
#[cfg(not(feature = "refine"))]
pub fn create_provider(
    _config: &AppConfig,
) -> Result<Box<dyn CompletionProvider>, CompletionError> {
    Err(CompletionError::Disabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "refine")]
    #[test]
    fn test_create_provider_with_key() {
        let config = AppConfig::builder()
            .completion_api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let provider = create_provider(&config).unwrap_or_else(|_| unreachable!());
        assert_eq!(provider.name(), "openai");
    }

    #[cfg(feature = "refine")]
    #[test]
    fn test_create_provider_without_key() {
        let config = AppConfig::default();
        assert!(matches!(
            create_provider(&config),
            Err(CompletionError::ApiKeyMissing)
        ));
    }

    #[cfg(not(feature = "refine"))]
    #[test]
    fn test_create_provider_disabled() {
        assert!(matches!(
            create_provider(&AppConfig::default()),
            Err(CompletionError::Disabled)
        ));
    }
}
