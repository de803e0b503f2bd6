//! Environment variable substitution, API key resolution, and defaulted getters.

use super::types::Config;

use crate::constants::{
    API_KEY_ENV_VARS, DEFAULT_BASE_URL, DEFAULT_MAX_ROUNDS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TOOL_TIMEOUT_SECS,
};
use crate::tools::Toolset;

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        self.model = Self::resolve_str(&self.model);
        if let Some(ref mut url) = self.base_url {
            *url = Self::resolve_str(url);
        }
        if let Some(ref mut key) = self.api_key {
            *key = Self::resolve_str(key);
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }

    /// Resolve the API key: env vars first, then config value.
    /// Empty values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        for var in API_KEY_ENV_VARS {
            if let Ok(val) = std::env::var(var) {
                if !val.is_empty() {
                    return Some(val);
                }
            }
        }
        self.api_key.clone().filter(|k| !k.is_empty())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn toolset(&self) -> Toolset {
        self.toolset.unwrap_or_default()
    }

    /// Completion rounds allowed per turn (never less than one).
    pub fn max_rounds(&self) -> usize {
        self.agent.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS).max(1)
    }

    pub fn tool_timeout_secs(&self) -> u64 {
        self.agent
            .tool_timeout_secs
            .unwrap_or(DEFAULT_TOOL_TIMEOUT_SECS)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.agent
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn feedback_errors(&self) -> bool {
        self.agent.feedback_errors.unwrap_or(false)
    }

    pub fn show_chain(&self) -> bool {
        self.agent.show_chain.unwrap_or(true)
    }
}
