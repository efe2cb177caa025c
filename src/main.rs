//! IntelliSearch command-line entry point.

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use intellisearch::cli::{Cli, execute};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = execute(&cli)?;
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
