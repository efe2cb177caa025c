//! Optional narrative refinement of a composed analysis.
//!
//! ```text
//! (query, analysis markdown)
//!   └── RefinerAgent ── build_refine_prompt
//!         └── dyn CompletionProvider
//!               └── OpenAiProvider (async-openai, any compatible base URL)
//! ```
//!
//! The `async-openai` backend is behind the `refine` feature (on by
//! default). Without it [`create_provider`] reports
//! [`CompletionError::Disabled`](crate::error::CompletionError::Disabled).

pub mod client;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod refiner;
pub mod traits;

pub use client::create_provider;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use provider::CompletionProvider;
pub use refiner::RefinerAgent;
pub use traits::{AgentResponse, CompletionAgent};
