//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// IntelliSearch: query a retrieval agent and synthesize a readable analysis.
///
/// Sends a query to a retrieval agent, normalizes its web results and RAG
/// chunks, and renders a markdown analysis with cited key points.
#[derive(Parser, Debug)]
#[command(name = "intellisearch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the retrieval agent.
    #[arg(long, env = "INTELLISEARCH_AGENT_URL", global = true)]
    pub agent_url: Option<String>,

    /// Agent timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single query and print the analysis.
    ///
    /// A failed query still prints its placeholder result and exits 0.
    #[command(after_help = r#"Examples:
  intellisearch query "rust async runtimes"              # Web results + analysis
  intellisearch query "rust async runtimes" --insights   # Add search statistics
  intellisearch query "tokio vs async-std" --refine      # Add an LLM-written narrative
  intellisearch query "wasm" --save                      # Save analysis to a timestamped file
  intellisearch --format json query "wasm" | jq '.analysis_text'
"#)]
    Query {
        /// Search query text.
        query: String,

        /// Rewrite the analysis into a narrative answer (needs GROQ_API_KEY or OPENAI_API_KEY).
        #[arg(short, long)]
        refine: bool,

        /// Save the analysis markdown, optionally to PATH.
        #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
        save: Option<Option<PathBuf>>,

        /// Print the retrieved chunks.
        #[arg(long)]
        show_chunks: bool,

        /// Print search statistics.
        #[arg(short, long)]
        insights: bool,
    },

    /// Start an interactive search session.
    ///
    /// Type a query to run it. Lines starting with ':' are session commands;
    /// type ':help' to list them.
    Repl,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query_flags() {
        let cli = Cli::try_parse_from([
            "intellisearch",
            "--format",
            "json",
            "query",
            "rust",
            "--refine",
            "--save",
            "--insights",
        ])
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.format, "json");
        match cli.command {
            Commands::Query {
                query,
                refine,
                save,
                show_chunks,
                insights,
            } => {
                assert_eq!(query, "rust");
                assert!(refine);
                assert_eq!(save, Some(None));
                assert!(!show_chunks);
                assert!(insights);
            }
            Commands::Repl => unreachable!(),
        }
    }

    #[test]
    fn test_parse_save_path() {
        let cli = Cli::try_parse_from(["intellisearch", "query", "q", "--save", "out.md"])
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(
            cli.command,
            Commands::Query { save: Some(Some(ref p)), .. } if p == &PathBuf::from("out.md")
        ));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["intellisearch", "repl", "--timeout", "30", "-v"])
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.timeout, Some(30));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Repl));
    }
}
