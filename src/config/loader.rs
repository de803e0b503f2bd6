//! File loading and merging for devloop configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{default_model, AgentConfig, Config};

impl Config {
    /// Loads the global config from `~/.config/devloop/config.toml`.
    ///
    /// If no config file exists, creates one with sensible defaults
    /// (including an `{env:VAR}` placeholder for the API key) and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let default_toml = format!(
                r#"model = "{}"
api_key = "{{env:OPENAI_KEY}}"

[agent]
max_rounds = {}
"#,
                default_model(),
                crate::constants::DEFAULT_MAX_ROUNDS
            );
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            return Self::parse(&default_toml, &path);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::parse(&contents, &path)
    }

    /// Look for devloop.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                let contents = fs::read_to_string(&candidate)
                    .with_context(|| format!("Failed to read config from {:?}", candidate))?;
                return Self::parse(&contents, &candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    pub(super) fn parse(contents: &str, path: &Path) -> Result<Config> {
        toml::from_str(contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: if project.model != default_model() {
                project.model
            } else {
                global.model
            },
            base_url: project.base_url.or(global.base_url),
            api_key: project.api_key.or(global.api_key),
            toolset: project.toolset.or(global.toolset),
            agent: AgentConfig {
                max_rounds: project.agent.max_rounds.or(global.agent.max_rounds),
                tool_timeout_secs: project
                    .agent
                    .tool_timeout_secs
                    .or(global.agent.tool_timeout_secs),
                request_timeout_secs: project
                    .agent
                    .request_timeout_secs
                    .or(global.agent.request_timeout_secs),
                feedback_errors: project
                    .agent
                    .feedback_errors
                    .or(global.agent.feedback_errors),
                show_chain: project.agent.show_chain.or(global.agent.show_chain),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Toolset;
    use std::path::PathBuf;

    fn parse(s: &str) -> Config {
        Config::parse(s, &PathBuf::from("test.toml")).unwrap()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("");
        assert_eq!(config.model, crate::constants::DEFAULT_MODEL);
        assert!(config.toolset.is_none());
        assert!(config.agent.max_rounds.is_none());
    }

    #[test]
    fn test_full_file_parses() {
        let config = parse(
            r#"
model = "gpt-4o-mini"
base_url = "http://localhost:11434/v1"
toolset = "weather"

[agent]
max_rounds = 5
tool_timeout_secs = 3
feedback_errors = true
show_chain = false
"#,
        );
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.toolset, Some(Toolset::Weather));
        assert_eq!(config.agent.max_rounds, Some(5));
        assert_eq!(config.agent.tool_timeout_secs, Some(3));
        assert_eq!(config.agent.feedback_errors, Some(true));
        assert_eq!(config.agent.show_chain, Some(false));
    }

    #[test]
    fn test_bad_toolset_rejected() {
        assert!(Config::parse(r#"toolset = "everything""#, &PathBuf::from("x.toml")).is_err());
    }

    #[test]
    fn test_project_values_win() {
        let global = parse(
            r#"
model = "gpt-4o-mini"
api_key = "global-key"
[agent]
max_rounds = 10
show_chain = true
"#,
        );
        let project = parse(
            r#"
toolset = "dev"
[agent]
max_rounds = 3
"#,
        );
        let merged = Config::merge(global, project);
        // Project left model at the default, so the global choice survives.
        assert_eq!(merged.model, "gpt-4o-mini");
        assert_eq!(merged.api_key.as_deref(), Some("global-key"));
        assert_eq!(merged.toolset, Some(Toolset::Dev));
        assert_eq!(merged.agent.max_rounds, Some(3));
        assert_eq!(merged.agent.show_chain, Some(true));
    }
}
