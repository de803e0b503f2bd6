//! Command-line interface definition and startup for devloop.
//!
//! Uses [`clap`] for argument parsing with derive macros. There are no
//! subcommands: every flag is an optional override of the loaded
//! configuration, and the program always ends up in the interactive loop.

use anyhow::Result;
use clap::Parser;

use crate::agent::{Agent, AgentSettings};
use crate::config::Config;
use crate::provider::OpenAiClient;
use crate::tools::{ToolRegistry, Toolset};
use crate::{chat, prompt};

/// Top-level CLI structure for devloop.
#[derive(Parser, Debug)]
#[command(
    name = "devloop",
    about = "Turn requests into tool calls through a plan/action/observation loop"
)]
pub struct Cli {
    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Completion rounds allowed per request before giving up
    #[arg(long)]
    pub max_rounds: Option<usize>,

    /// Which tools to expose
    #[arg(short, long, value_enum)]
    pub toolset: Option<Toolset>,

    /// Return unknown-tool and parse errors to the model instead of ending the request
    #[arg(long)]
    pub feedback_errors: bool,

    /// Do not echo raw model messages
    #[arg(short, long)]
    pub quiet_chain: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer command-line overrides on top of file configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(ref url) = self.base_url {
            config.base_url = Some(url.clone());
        }
        if let Some(rounds) = self.max_rounds {
            config.agent.max_rounds = Some(rounds);
        }
        if let Some(toolset) = self.toolset {
            config.toolset = Some(toolset);
        }
        if self.feedback_errors {
            config.agent.feedback_errors = Some(true);
        }
        if self.quiet_chain {
            config.agent.show_chain = Some(false);
        }
    }
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Loads configuration, wires up the agent, and hands off to the REPL.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    cli.apply(&mut config);

    let root = std::env::current_dir()?;
    let tools = ToolRegistry::for_toolset(config.toolset(), root)?;
    let system_prompt = prompt::system_prompt(&tools);
    let client = OpenAiClient::from_config(&config)?;

    tracing::info!(
        model = %client.model(),
        tools = tools.len(),
        max_rounds = config.max_rounds(),
        "starting session"
    );

    let agent = Agent::new(
        client,
        tools,
        system_prompt,
        AgentSettings::from_config(&config),
    );
    chat::run_chat(agent, &config).await
}
