//! Centralized constants for devloop.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "devloop";

/// Default chat-completions model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default base URL for the OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["OPENAI_KEY", "OPENAI_API_KEY"];

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "devloop.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "history.txt";

// --- Agent loop ---

/// Completion rounds allowed per turn before it is abandoned.
pub const DEFAULT_MAX_ROUNDS: usize = 25;

/// Seconds a single tool call may run before it is cut off.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 60;

/// Seconds to wait for one completion round-trip.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// --- Tool limits ---

/// Maximum bytes of tool output (file contents, command stdout+stderr)
/// placed in a single observation.
pub const TOOL_MAX_OUTPUT_SIZE: usize = 50 * 1024;

/// Environment variables stripped from child processes.
pub const COMMAND_STRIPPED_ENV_VARS: &[&str] = &[
    "OPENAI_KEY",
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "OPENROUTER_API_KEY",
];

/// Result returned by getWeatherDetails for cities not in the table.
pub const UNKNOWN_CITY_WEATHER: &str = "0°";
