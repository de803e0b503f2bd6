//! Output rendering abstraction for devloop.
//!
//! Defines the [`Renderer`] trait that decouples the agent loop from the
//! display layer. [`StdoutRenderer`] prints colored step events to the
//! terminal; tests use a recording renderer instead.

use colored::Colorize;
use serde_json::Value;

use crate::format;

/// Receives step events from the agent loop as they happen.
pub trait Renderer {
    /// A raw assistant message, exactly as received.
    fn render_chain(&mut self, raw: &str);

    fn render_plan(&mut self, plan: &str);

    /// A tool call about to run.
    fn render_action(&mut self, function: &str, input: &Value);

    /// An observation the model wrote itself.
    fn render_observation(&mut self, observation: &str);

    /// The final answer of a turn.
    fn render_output(&mut self, output: &str);

    /// Called when a turn is abandoned.
    fn render_error(&mut self, err: &str);
}

/// Prints step events to stdout (errors to stderr).
pub struct StdoutRenderer {
    /// Whether raw assistant messages are echoed.
    show_chain: bool,
}

impl StdoutRenderer {
    pub fn new(show_chain: bool) -> Self {
        Self { show_chain }
    }
}

impl Renderer for StdoutRenderer {
    fn render_chain(&mut self, raw: &str) {
        if self.show_chain {
            println!("{} {}", "📦 AI CHAIN:".dimmed(), raw.dimmed());
        }
    }

    fn render_plan(&mut self, plan: &str) {
        println!("{} {}", "🧠 PLAN:".magenta().bold(), plan);
    }

    fn render_action(&mut self, function: &str, input: &Value) {
        println!(
            "{} {}",
            "⚙️ ACTION:".blue().bold(),
            format::format_call(function, input)
        );
    }

    fn render_observation(&mut self, observation: &str) {
        println!("{} {}", "👁️ OBSERVATION:".green(), observation);
    }

    fn render_output(&mut self, output: &str) {
        println!(
            "{} {}",
            "🤖 OUTPUT:".yellow().bold(),
            format::render_markdown_lite(output)
        );
    }

    fn render_error(&mut self, err: &str) {
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}
