//! Concrete [`CompletionProvider`](super::provider::CompletionProvider) backends.

#[cfg(feature = "refine")]
pub mod openai;

#[cfg(feature = "refine")]
pub use openai::OpenAiProvider;
