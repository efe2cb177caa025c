//! CLI layer for IntelliSearch.
//!
//! Provides the command-line interface using clap: a one-shot `query`
//! command and an interactive `repl` session.

pub mod commands;
pub mod output;
pub mod parser;
pub mod repl;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
