//! Entry point for devloop, an interactive agent that answers requests by
//! driving a model through plan, action, and observation steps.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! installs the tracing subscriber, and hands off to [`cli::run`].

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod format;
mod output;
mod prompt;
mod provider;
mod step;
mod tools;
mod transcript;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Runs the devloop CLI.
///
/// Loads `.env` files (silently ignored if absent) before anything reads the
/// environment. Logs go to stderr so they never interleave with rendered
/// steps; `RUST_LOG` takes precedence over `--verbose`.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli).await
}
