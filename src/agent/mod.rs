//! Retrieval agent lifecycle and transport.
//!
//! The agent itself is an external service. This module owns the client
//! side of its initialize/send contract:
//!
//! ```text
//! AgentHandle (state machine + timeouts)
//!   └── dyn AgentBackend
//!         └── HttpAgent (POST /initialize, POST /query)
//! ```

pub mod backend;
pub mod handle;
pub mod http;

pub use backend::AgentBackend;
pub use handle::{AgentHandle, AgentState};
pub use http::HttpAgent;
