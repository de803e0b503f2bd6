//! System prompt construction.
//!
//! The prompt is the only schema the model ever sees, so the tool list in it
//! is rendered from the live [`ToolRegistry`] rather than written by hand.
//! The worked example is picked from tools the registry actually holds.

use crate::tools::{ToolName, ToolRegistry};

const PROTOCOL_RULES: &str = "\
You are a CLI AI assistant with structured reasoning in START, PLAN, ACTION, OBSERVATION, and OUTPUT format.
Wait for the user prompt and first PLAN using the available tools.
After planning, take an ACTION with an appropriate tool and wait for the OBSERVATION based on the action.
Once you get the observations, return the AI response based on the START prompt and observations.

Your responses MUST be in JSON format: every response is exactly one JSON object with a \"type\" field.
Allowed types and their fields:
- {\"type\":\"plan\",\"plan\":Str}
- {\"type\":\"action\",\"function\":Str,\"input\":<tool input>}
- {\"type\":\"observation\",\"observation\":Str}
- {\"type\":\"output\",\"output\":Str}
Emit one step per response. Tool results arrive as observation messages; never invent them.
Finish every request with exactly one output step.";

const FILE_EXAMPLE: &str = r#"START
{"type":"user","user":"create a file index.js with console.log"}
{"type":"plan","plan":"I will use writeFile to create index.js"}
{"type":"action","function":"writeFile","input":{"path":"index.js","content":"console.log('Hello World')"}}
{"type":"observation","observation":"✅ File written successfully to index.js"}
{"type":"output","output":"File created successfully."}"#;

const WEATHER_EXAMPLE: &str = r#"START
{"type":"user","user":"What is the sum of weather of London and Tokyo?"}
{"type":"plan","plan":"I will call getWeatherDetails for London"}
{"type":"action","function":"getWeatherDetails","input":"london"}
{"type":"observation","observation":"15°"}
{"type":"plan","plan":"I will call getWeatherDetails for Tokyo"}
{"type":"action","function":"getWeatherDetails","input":"tokyo"}
{"type":"observation","observation":"25°"}
{"type":"output","output":"The sum of weather of London and Tokyo is 40°"}"#;

/// Builds the system entry: protocol rules, tool catalogue, worked example.
pub fn system_prompt(registry: &ToolRegistry) -> String {
    let names = registry.names();
    let mut prompt = String::from(PROTOCOL_RULES);

    prompt.push_str("\n\nAvailable Tools (call them with an action step):\n");
    prompt.push_str(&registry.catalogue());

    let example = if names.contains(&ToolName::WriteFile) {
        Some(FILE_EXAMPLE)
    } else if names.contains(&ToolName::GetWeatherDetails) {
        Some(WEATHER_EXAMPLE)
    } else {
        None
    };
    if let Some(example) = example {
        prompt.push_str("\n\nExample:\n");
        prompt.push_str(example);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Toolset;
    use std::path::PathBuf;

    fn registry(toolset: Toolset) -> ToolRegistry {
        ToolRegistry::for_toolset(toolset, PathBuf::from(".")).unwrap()
    }

    #[test]
    fn test_prompt_embeds_registry_catalogue() {
        let reg = registry(Toolset::All);
        let prompt = system_prompt(&reg);
        assert!(prompt.contains(&reg.catalogue()));
        assert!(prompt.contains("\"type\":\"output\""));
    }

    #[test]
    fn test_prompt_only_mentions_registered_tools() {
        let prompt = system_prompt(&registry(Toolset::Weather));
        assert!(prompt.contains("getWeatherDetails"));
        assert!(!prompt.contains("writeFile"));
        assert!(!prompt.contains("executeCommand"));
    }

    #[test]
    fn test_dev_prompt_uses_file_example() {
        let prompt = system_prompt(&registry(Toolset::Dev));
        assert!(prompt.contains("create a file index.js"));
        assert!(!prompt.contains("getWeatherDetails"));
    }

    #[test]
    fn test_empty_registry_has_no_example() {
        let prompt = system_prompt(&ToolRegistry::new());
        assert!(!prompt.contains("Example:"));
    }
}
