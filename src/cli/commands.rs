//! CLI command implementations.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::cli::output::{Extras, OutputFormat, format_outcome, save_analysis};
use crate::cli::parser::{Cli, Commands};
use crate::cli::repl;
use crate::config::AppConfig;
use crate::core::Insights;
use crate::error::{CommandError, CompletionError, Result};
use crate::refine::{RefinerAgent, create_provider};
use crate::session::Session;

/// Parameters for the query command.
#[derive(Debug, Clone, Default)]
pub struct QueryParams<'a> {
    /// Search query text.
    pub query: &'a str,
    /// Refine the analysis into a narrative answer.
    pub refine: bool,
    /// Save the analysis: `Some(None)` for the default file name.
    pub save: Option<Option<&'a std::path::Path>>,
    /// Print retrieved chunks.
    pub show_chunks: bool,
    /// Print search statistics.
    pub insights: bool,
}

/// Executes the CLI command.
///
/// # Returns
///
/// Output to print on stdout. The interactive session writes its own
/// output and returns an empty string.
///
/// # Errors
///
/// Returns an error for invalid configuration, an unwritable save path, or
/// terminal I/O failures. A failed query is not an error.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = build_config(cli)?;

    // Create tokio runtime as sync/async bridge
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;

    match &cli.command {
        Commands::Query {
            query,
            refine,
            save,
            show_chunks,
            insights,
        } => {
            let params = QueryParams {
                query,
                refine: *refine,
                save: save.as_ref().map(Option::as_deref),
                show_chunks: *show_chunks,
                insights: *insights,
            };
            rt.block_on(cmd_query(&config, &params, format))
        }
        Commands::Repl => {
            let session = Session::from_config(&config)?;
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            rt.block_on(repl::run(session, &config, stdin, &mut stdout, format))?;
            Ok(String::new())
        }
    }
}

/// Resolves configuration: CLI flags over environment over defaults.
fn build_config(cli: &Cli) -> Result<AppConfig> {
    let mut builder = AppConfig::builder();
    if let Some(url) = &cli.agent_url {
        builder = builder.agent_url(url);
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(
                CommandError::InvalidArgument("--timeout must be at least 1 second".into()).into(),
            );
        }
        builder = builder.agent_timeout(Duration::from_secs(secs));
    }
    Ok(builder.from_env().build()?)
}

async fn cmd_query(
    config: &AppConfig,
    params: &QueryParams<'_>,
    format: OutputFormat,
) -> Result<String> {
    let mut session = Session::from_config(config)?;
    let outcome = session.submit(params.query).await.clone();

    let insights = params
        .insights
        .then(|| Insights::compute(params.query, &outcome.rag_chunks));

    let mut refined = None;
    let mut refine_error = None;
    if params.refine && !outcome.is_degraded() {
        match refine_analysis(config, params.query, &outcome.analysis_text).await {
            Ok(text) => refined = Some(text),
            Err(e) => refine_error = Some(e.to_string()),
        }
    }

    let saved_to: Option<PathBuf> = match params.save {
        Some(path) if !outcome.is_degraded() => {
            Some(save_analysis(path, &outcome.analysis_text)?)
        }
        Some(_) => {
            warn!("query failed, analysis not saved");
            None
        }
        None => None,
    };

    session.close();

    let extras = Extras {
        show_chunks: params.show_chunks,
        insights: insights.as_ref(),
        refined: refined.as_deref(),
        refine_error: refine_error.as_deref(),
        saved_to: saved_to.as_deref(),
    };
    Ok(format_outcome(params.query, &outcome, &extras, format))
}

/// Rewrites `analysis` into a narrative answer to `query`.
///
/// # Errors
///
/// Returns [`CompletionError`] if no provider is available or the
/// completion fails.
pub async fn refine_analysis(
    config: &AppConfig,
    query: &str,
    analysis: &str,
) -> std::result::Result<String, CompletionError> {
    let provider = create_provider(config)?;
    RefinerAgent::new(config)
        .refine(provider.as_ref(), query, analysis)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_build_config_from_flags() {
        let cli = Cli::try_parse_from([
            "intellisearch",
            "--agent-url",
            "http://agent.test:9000",
            "--timeout",
            "7",
            "repl",
        ])
        .unwrap_or_else(|_| unreachable!());
        let config = build_config(&cli).unwrap_or_else(|_| unreachable!());
        assert_eq!(config.agent_url, "http://agent.test:9000");
        assert_eq!(config.agent_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = Cli::try_parse_from(["intellisearch", "--timeout", "0", "repl"])
            .unwrap_or_else(|_| unreachable!());
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_invalid_agent_url_rejected() {
        let cli = Cli::try_parse_from(["intellisearch", "--agent-url", "::nope", "repl"])
            .unwrap_or_else(|_| unreachable!());
        assert!(build_config(&cli).is_err());
    }

    #[tokio::test]
    async fn test_refine_without_key_fails_cleanly() {
        let config = AppConfig::default();
        let result = refine_analysis(&config, "q", "# Analysis: q").await;
        assert!(matches!(
            result,
            Err(CompletionError::ApiKeyMissing | CompletionError::Disabled)
        ));
    }
}
