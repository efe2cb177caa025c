//! Response synthesis pipeline.
//!
//! ```text
//! RawResponse ──normalize──▶ NormalizedResponse
//!                                 │ rag_chunks
//!                                 ▼
//!                     KeyPointExtractor ──▶ Vec<KeyPoint>
//!                                                │
//!                                                ▼
//!                                   AnalysisComposer ──▶ AnalysisDocument
//! ```
//!
//! [`QueryOrchestrator`] drives the stages for one query and turns any
//! failure into a degraded [`QueryOutcome`].

pub mod composer;
pub mod extractor;
pub mod heuristics;
pub mod normalizer;
pub mod orchestrator;

pub use composer::{AnalysisComposer, AnalysisDocument, NO_ANALYSIS_NOTICE};
pub use extractor::KeyPointExtractor;
pub use heuristics::HeuristicConfig;
pub use normalizer::normalize;
pub use orchestrator::{
    AnalysisReport, ERROR_ANALYSIS, ERROR_PREFIX, MAX_QUERY_LEN, QueryOrchestrator, QueryOutcome,
};
