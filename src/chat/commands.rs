//! Slash command handlers for the REPL.
//!
//! Commands only read agent state; none of them touch the transcript,
//! and none are ever sent to the model. A line that starts with `/` but
//! names no command is an ordinary request (`/etc/hosts: what is in it?`).

use colored::Colorize;

use crate::agent::{Agent, TurnOutcome};
use crate::format;
use crate::output::Renderer;
use crate::provider::CompletionClient;

/// Action returned by slash command handling.
#[derive(Debug, PartialEq)]
pub(crate) enum CommandAction {
    /// Command was handled; continue the REPL loop.
    Continue,
    /// Not a command; the line goes to the model.
    Prompt,
}

/// Routes one input line: known commands are handled locally, everything
/// else becomes an agent turn. Returns the turn's outcome if one ran.
pub(crate) async fn dispatch_line<C: CompletionClient>(
    line: &str,
    agent: &mut Agent<C>,
    renderer: &mut dyn Renderer,
) -> Option<TurnOutcome> {
    if line.starts_with('/') && handle_slash_command(line, agent) == CommandAction::Continue {
        return None;
    }
    Some(agent.run_turn(line, renderer).await)
}

pub(crate) fn handle_slash_command<C>(command: &str, agent: &Agent<C>) -> CommandAction {
    match command {
        "/history" => {
            for entry in agent.transcript().conversation() {
                println!("{}", format::format_entry(entry));
                println!();
            }
            CommandAction::Continue
        }
        "/tools" => {
            println!("{}", agent.tools().catalogue());
            CommandAction::Continue
        }
        "/help" => {
            println!("{}", "Commands:".bold());
            println!("  {} - show the conversation so far", "/history".cyan());
            println!("  {} - list the available tools", "/tools".cyan());
            println!("  {} - show this help", "/help".cyan());
            println!("  {} - exit", "Ctrl+D".cyan());
            CommandAction::Continue
        }
        _ => CommandAction::Prompt,
    }
}
