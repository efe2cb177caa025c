//! Interactive search session.
//!
//! Reads one line at a time. Plain lines are queries; lines starting with
//! `:` are session commands.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use serde_json::json;
use tracing::debug;

use crate::cli::commands::refine_analysis;
use crate::cli::output::{
    Extras, OutputFormat, format_chunks, format_history, format_insights, format_outcome,
    format_sources, save_analysis,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::session::Session;

const PROMPT: &str = "intellisearch> ";

const HELP: &str = "\
Type a query to search, or one of:
  :history       list recent searches
  :N             re-run recent search N
  :insights      statistics for the last search
  :sources       top sources of the last search
  :chunks        documents retrieved by the last search
  :save [PATH]   save the last analysis as markdown
  :refine        rewrite the last analysis as a narrative answer
  :reset         clear history and results
  :quit          exit
";

/// A parsed REPL input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Run a query.
    Query(String),
    /// Re-run the Nth most recent query.
    Rerun(usize),
    /// List recent searches.
    History,
    /// Show insights for the last result.
    Insights,
    /// Show the top sources of the last result.
    Sources,
    /// Show the chunks of the last result.
    Chunks,
    /// Save the last analysis.
    Save(Option<PathBuf>),
    /// Refine the last analysis.
    Refine,
    /// Clear history and results.
    Reset,
    /// Show help.
    Help,
    /// Leave the session.
    Quit,
    /// Blank line.
    Empty,
    /// Unrecognized `:` command.
    Unknown(String),
}

impl ReplCommand {
    /// Parses one input line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Self::Query(line.to_string());
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));
        match name {
            "q" | "quit" | "exit" => Self::Quit,
            "h" | "help" => Self::Help,
            "history" => Self::History,
            "insights" => Self::Insights,
            "sources" => Self::Sources,
            "chunks" => Self::Chunks,
            "refine" => Self::Refine,
            "reset" => Self::Reset,
            "save" if arg.is_empty() => Self::Save(None),
            "save" => Self::Save(Some(PathBuf::from(arg))),
            n => n
                .parse::<usize>()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::Rerun),
        }
    }
}

/// Wraps a plain session message for the active format.
fn notice(text: String, format: OutputFormat) -> String {
    if format == OutputFormat::Text {
        return text;
    }
    format.to_json(&json!({ "message": text.trim_end() }))
}

/// Runs an interactive session until `:quit` or end of input.
///
/// In the JSON formats only JSON documents are written: the banner, prompt
/// and farewell are omitted and plain messages become `{"message": ...}`.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R: BufRead, W: Write>(
    mut session: Session,
    config: &AppConfig,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let interactive = format == OutputFormat::Text;
    if interactive {
        writeln!(output, "IntelliSearch interactive session. Type :help for commands.")?;
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    for line in input.lines() {
        let command = ReplCommand::parse(&line?);
        debug!(?command, "repl command");

        let text = match command {
            ReplCommand::Quit => break,
            ReplCommand::Empty => String::new(),
            ReplCommand::Help => notice(HELP.to_string(), format),
            ReplCommand::Unknown(s) => notice(
                format!("Unknown command '{s}'. Type :help for commands.\n"),
                format,
            ),
            ReplCommand::Query(query) => {
                let outcome = session.submit(&query).await;
                format_outcome(&query, outcome, &Extras::default(), format)
            }
            ReplCommand::Rerun(n) => {
                let query = session.recent_entry(n).map(str::to_string);
                match (query, session.rerun(n).await) {
                    (Some(query), Some(outcome)) => {
                        format_outcome(&query, outcome, &Extras::default(), format)
                    }
                    _ => notice(
                        format!("No recent search :{n}. Type :history to list them.\n"),
                        format,
                    ),
                }
            }
            ReplCommand::History => format_history(session.history(), format),
            ReplCommand::Insights => match session.insights() {
                None => notice("No search yet.\n".to_string(), format),
                Some(insights) if interactive => format_insights(&insights),
                Some(insights) => format.to_json(&insights),
            },
            ReplCommand::Sources => match session.insights() {
                None => notice("No search yet.\n".to_string(), format),
                Some(insights) if interactive => format_sources(&insights),
                Some(insights) => format.to_json(&insights.unique_sources),
            },
            ReplCommand::Chunks => match session.last() {
                None => notice("No search yet.\n".to_string(), format),
                Some(last) if interactive => format_chunks(&last.outcome.rag_chunks),
                Some(last) => format.to_json(&last.outcome.rag_chunks),
            },
            ReplCommand::Save(path) => notice(
                match session.last() {
                    Some(last) if !last.outcome.is_degraded() => {
                        match save_analysis(path.as_deref(), &last.outcome.analysis_text) {
                            Ok(saved) => format!("📥 Analysis saved to {}\n", saved.display()),
                            Err(e) => format!("Save failed: {e}\n"),
                        }
                    }
                    _ => "No analysis to save.\n".to_string(),
                },
                format,
            ),
            ReplCommand::Refine => notice(
                match session.last() {
                    Some(last) if !last.outcome.is_degraded() => {
                        match refine_analysis(config, &last.query, &last.outcome.analysis_text)
                            .await
                        {
                            Ok(text) => format!("## Refined Answer\n\n{}\n", text.trim_end()),
                            Err(e) => format!("⚠️ Refinement failed: {e}\n"),
                        }
                    }
                    _ => "No analysis to refine.\n".to_string(),
                },
                format,
            ),
            ReplCommand::Reset => {
                session.reset();
                notice("Session reset.\n".to_string(), format)
            }
        };

        output.write_all(text.as_bytes())?;
        if interactive {
            write!(output, "{PROMPT}")?;
        }
        output.flush()?;
    }

    if interactive {
        writeln!(output, "\n👋 Thanks for using IntelliSearch!")?;
    }
    session.close();
    Ok(())
}
