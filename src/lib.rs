//! # IntelliSearch
//!
//! Query dispatch and response synthesis for retrieval agents.
//!
//! A query goes to an external retrieval agent, which answers with web
//! search results and retrieved document chunks (RAG). The reply is
//! normalized, key sentences are extracted from the chunks, and a markdown
//! analysis with cited sources is composed from them. Any failure yields a
//! uniform degraded result instead of an error.
//!
//! ## Architecture
//!
//! ```text
//! Session
//!   ├── AgentHandle ── dyn AgentBackend (HttpAgent)
//!   ├── QueryOrchestrator
//!   │     normalize → KeyPointExtractor → AnalysisComposer
//!   └── SearchHistory
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use intellisearch::{AppConfig, Session};
//!
//! # async fn run() -> intellisearch::Result<()> {
//! let config = AppConfig::from_env()?;
//! let mut session = Session::from_config(&config)?;
//! let outcome = session.submit("what is retrieval-augmented generation").await;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod refine;
pub mod session;

pub use agent::{AgentBackend, AgentHandle, AgentState, HttpAgent};
pub use config::{AppConfig, AppConfigBuilder};
pub use core::{Chunk, Insights, KeyPoint, NormalizedResponse, RawResponse, SearchHistory};
pub use error::{Error, Result};
pub use pipeline::{
    AnalysisComposer, AnalysisDocument, HeuristicConfig, KeyPointExtractor, QueryOrchestrator,
    QueryOutcome, normalize,
};
pub use session::Session;
