//! Core data model shared by the agent, pipeline, and CLI layers.
//!
//! These types carry no I/O. Everything here except [`SearchHistory`] is a
//! transient per-query value.

pub mod chunk;
pub mod history;
pub mod insights;
pub mod key_point;
pub mod response;

pub use chunk::{Chunk, ChunkMetadata, UNKNOWN_SOURCE};
pub use history::{DEFAULT_HISTORY_CAPACITY, SearchHistory};
pub use insights::{Insights, SOURCES_OVERVIEW_LIMIT};
pub use key_point::KeyPoint;
pub use response::{NO_RESULTS_AVAILABLE, NO_SEARCH_RESULTS, NormalizedResponse, RawResponse};
