//! The plan/action/observation control loop.
//!
//! [`Agent`] owns the [`Transcript`] for the whole process. Each call to
//! [`Agent::run_turn`] appends one user step and then alternates between
//! asking the model for its next step and handling that step, until the
//! model produces an `output` step or the turn has to be abandoned.
//!
//! Within a turn the loop moves through three states:
//!
//! - `AwaitingModel`: request a completion over the full transcript. The
//!   raw reply is appended as an assistant entry before anything else looks
//!   at it.
//! - `HandlingStep`: dispatch on the step's `type`. Actions run their tool
//!   and append the result as an observation on the developer channel.
//! - `Done`: the turn ended, either completed or abandoned.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::output::Renderer;
use crate::provider::{CompletionClient, CompletionError};
use crate::step::{Step, StepError};
use crate::tools::{ToolRegistry, UnknownTool};
use crate::transcript::{Entry, Transcript};

/// Loop limits and error policy.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Completion rounds allowed per turn.
    pub max_rounds: usize,
    /// Upper bound on a single tool call.
    pub tool_timeout: Duration,
    /// Hand unknown-tool and parse errors back to the model as observations
    /// instead of abandoning the turn.
    pub feedback_errors: bool,
}

impl AgentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_rounds: config.max_rounds(),
            tool_timeout: Duration::from_secs(config.tool_timeout_secs()),
            feedback_errors: config.feedback_errors(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Why a turn was abandoned.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("could not parse model response: {0}")]
    Parse(#[from] StepError),

    #[error(transparent)]
    UnknownTool(#[from] UnknownTool),

    #[error("round budget exceeded: no output after {0} rounds")]
    BudgetExceeded(usize),
}

impl TurnError {
    /// Errors the model can plausibly fix on its next round.
    fn is_correctable(&self) -> bool {
        matches!(self, TurnError::Parse(_) | TurnError::UnknownTool(_))
    }
}

/// How a turn ended.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The model produced its final answer.
    Completed { output: String },
    /// The turn stopped without an answer.
    Abandoned(TurnError),
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}

enum State {
    AwaitingModel,
    HandlingStep(Step),
    Done(TurnOutcome),
}

/// Drives the model through the step protocol.
pub struct Agent<C> {
    client: C,
    tools: ToolRegistry,
    transcript: Transcript,
    settings: AgentSettings,
}

impl<C> Agent<C> {
    /// Read-only view of the conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}

impl<C: CompletionClient> Agent<C> {
    /// Creates an agent whose transcript starts with `system_prompt`.
    pub fn new(
        client: C,
        tools: ToolRegistry,
        system_prompt: impl Into<String>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            client,
            tools,
            transcript: Transcript::new(system_prompt),
            settings,
        }
    }

    /// Runs one user turn to completion or abandonment.
    ///
    /// Never returns an `Err`: every failure is reported through `renderer`
    /// and folded into [`TurnOutcome::Abandoned`], leaving the agent ready
    /// for the next line of input.
    pub async fn run_turn(&mut self, input: &str, renderer: &mut dyn Renderer) -> TurnOutcome {
        self.transcript.push(Entry::user_step(input));

        let mut rounds = 0;
        let mut state = State::AwaitingModel;
        loop {
            state = match state {
                State::AwaitingModel => {
                    if rounds >= self.settings.max_rounds {
                        self.abandon(TurnError::BudgetExceeded(rounds), renderer)
                    } else {
                        rounds += 1;
                        tracing::debug!(round = rounds, "awaiting model");
                        match self.next_step(renderer).await {
                            Ok(step) => State::HandlingStep(step),
                            Err(e) => self.fail(e, renderer),
                        }
                    }
                }
                State::HandlingStep(step) => self.handle_step(step, renderer).await,
                State::Done(outcome) => {
                    tracing::info!(
                        rounds,
                        completed = outcome.is_completed(),
                        "turn finished"
                    );
                    return outcome;
                }
            };
        }
    }

    /// One completion round: request, record, parse.
    async fn next_step(&mut self, renderer: &mut dyn Renderer) -> Result<Step, TurnError> {
        let raw = self.client.complete(self.transcript.snapshot()).await?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TurnError::EmptyResponse);
        }

        renderer.render_chain(raw);
        // Appended before parsing, even if parsing fails.
        self.transcript.push(Entry::assistant(raw));

        Ok(Step::parse(raw)?)
    }

    async fn handle_step(&mut self, step: Step, renderer: &mut dyn Renderer) -> State {
        match step {
            Step::Output { output } => {
                renderer.render_output(&output);
                State::Done(TurnOutcome::Completed { output })
            }
            Step::Plan { plan } => {
                renderer.render_plan(&plan);
                State::AwaitingModel
            }
            Step::Action { function, input } => self.run_action(&function, input, renderer).await,
            Step::Observation { observation } => {
                renderer.render_observation(&observation);
                State::AwaitingModel
            }
            Step::User { user } => {
                tracing::warn!(text = %user, "model emitted a user step; ignoring");
                State::AwaitingModel
            }
        }
    }

    async fn run_action(
        &mut self,
        function: &str,
        input: Value,
        renderer: &mut dyn Renderer,
    ) -> State {
        if let Err(e) = self.tools.lookup(function).map(|_| ()) {
            return self.fail(e.into(), renderer);
        }

        renderer.render_action(function, &input);
        let timeout = self.settings.tool_timeout;
        let result = tokio::time::timeout(timeout, self.tools.invoke(function, input)).await;
        let observation = match result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => return self.fail(e.into(), renderer),
            Err(_) => format!(
                "Error: {} timed out after {}s",
                function,
                timeout.as_secs()
            ),
        };

        tracing::debug!(tool = function, bytes = observation.len(), "tool finished");
        self.transcript.push(Entry::observation(observation));
        State::AwaitingModel
    }

    /// Either feeds a correctable error back to the model or ends the turn.
    fn fail(&mut self, error: TurnError, renderer: &mut dyn Renderer) -> State {
        if self.settings.feedback_errors && error.is_correctable() {
            tracing::info!(error = %error, "returning error to model");
            renderer.render_error(&format!("{} (returned to the model)", error));
            self.transcript.push(Entry::observation(feedback_message(
                &error,
                &self.tools,
            )));
            return State::AwaitingModel;
        }
        self.abandon(error, renderer)
    }

    fn abandon(&self, error: TurnError, renderer: &mut dyn Renderer) -> State {
        tracing::warn!(error = %error, "turn abandoned");
        renderer.render_error(&error.to_string());
        State::Done(TurnOutcome::Abandoned(error))
    }
}

/// Observation text sent back to the model when it can retry.
fn feedback_message(error: &TurnError, tools: &ToolRegistry) -> String {
    match error {
        TurnError::UnknownTool(e) => {
            let names: Vec<&str> = tools.names().iter().map(|n| n.as_str()).collect();
            format!("Error: {}. Available functions: {}", e, names.join(", "))
        }
        other => format!(
            "Error: {}. Reply with exactly one JSON object with a valid \"type\".",
            other
        ),
    }
}
