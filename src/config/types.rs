//! Struct definitions and serde defaults for devloop configuration.

use serde::{Deserialize, Serialize};

use crate::tools::Toolset;

/// Root configuration for devloop, deserialized from `config.toml`.
///
/// Fields use serde defaults so devloop can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Chat-completions model identifier (e.g. `"gpt-4o"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of an OpenAI-compatible API. Defaults to api.openai.com.
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key. Environment variables take precedence over this value.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Which tools the session exposes.
    #[serde(default)]
    pub toolset: Option<Toolset>,
    /// Agent loop limits and behavior.
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Returns the default model identifier.
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

/// Tuning for the agent loop. Unset fields fall back to `constants`.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AgentConfig {
    /// Completion rounds allowed per turn.
    pub max_rounds: Option<usize>,
    /// Seconds a single tool call may run.
    pub tool_timeout_secs: Option<u64>,
    /// Seconds to wait for one completion round-trip.
    pub request_timeout_secs: Option<u64>,
    /// Feed unknown-tool and parse errors back to the model instead of
    /// abandoning the turn.
    pub feedback_errors: Option<bool>,
    /// Print every raw assistant message as it arrives.
    pub show_chain: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key: None,
            toolset: None,
            agent: AgentConfig::default(),
        }
    }
}
