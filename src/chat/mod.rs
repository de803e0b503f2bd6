//! Interactive REPL for devloop.
//!
//! Uses [`rustyline`] for line editing and history. Each non-command line
//! becomes one agent turn; the agent keeps the full transcript across turns
//! so the model sees everything said so far.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::agent::Agent;
use crate::config::Config;
use crate::output::StdoutRenderer;
use crate::provider::CompletionClient;

/// Runs the interactive loop until Ctrl+D.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/devloop/history.txt`
pub async fn run_chat<C: CompletionClient>(mut agent: Agent<C>, config: &Config) -> Result<()> {
    println!(
        "{} [model: {}] [tools: {}] (Ctrl+D to exit, /help for commands)",
        "🧠 devloop ready!".green().bold(),
        config.model.yellow(),
        agent.tools().len(),
    );
    println!();

    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()?.join(crate::constants::HISTORY_FILENAME);
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    let mut renderer = StdoutRenderer::new(config.show_chain());

    loop {
        let readline = rl.readline(&format!("{} ", ">>".cyan().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let Some(outcome) =
                    commands::dispatch_line(&line, &mut agent, &mut renderer).await
                else {
                    continue;
                };
                tracing::debug!(
                    completed = outcome.is_completed(),
                    entries = agent.transcript().len(),
                    "turn recorded"
                );
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}
