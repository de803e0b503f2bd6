pub mod append_file;
pub mod execute_command;
pub mod read_file;
pub mod weather;
pub mod write_file;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::constants::TOOL_MAX_OUTPUT_SIZE;

use append_file::AppendFileTool;
use execute_command::ExecuteCommandTool;
use read_file::ReadFileTool;
use weather::WeatherTool;
use write_file::WriteFileTool;

/// The result of executing a tool.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

/// Every tool the agent can ever call. The set is closed: the model's
/// `function` string either parses into one of these or the call is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ReadFile,
    WriteFile,
    AppendFile,
    ExecuteCommand,
    GetWeatherDetails,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::ReadFile,
        ToolName::WriteFile,
        ToolName::AppendFile,
        ToolName::ExecuteCommand,
        ToolName::GetWeatherDetails,
    ];

    /// The wire name used in `action` steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ReadFile => "readFile",
            ToolName::WriteFile => "writeFile",
            ToolName::AppendFile => "appendFile",
            ToolName::ExecuteCommand => "executeCommand",
            ToolName::GetWeatherDetails => "getWeatherDetails",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownTool { name: s.to_string() })
    }
}

/// Returned when the model names a function the registry does not hold.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown function: {name}")]
pub struct UnknownTool {
    pub name: String,
}

/// Which part of the catalogue a session exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Toolset {
    /// File and shell tools.
    Dev,
    /// The weather lookup only.
    Weather,
    /// Everything.
    #[default]
    All,
}

impl Toolset {
    pub fn tools(&self) -> &'static [ToolName] {
        match self {
            Toolset::Dev => &[
                ToolName::ReadFile,
                ToolName::WriteFile,
                ToolName::AppendFile,
                ToolName::ExecuteCommand,
            ],
            Toolset::Weather => &[ToolName::GetWeatherDetails],
            Toolset::All => &ToolName::ALL,
        }
    }
}

/// Every tool implements this trait.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call this tool.
    fn name(&self) -> ToolName;

    /// Call shape shown to the model, e.g. `readFile(path: Str): Str`.
    fn signature(&self) -> &str;

    /// One-line description for the system prompt.
    fn description(&self) -> &str;

    /// Execute the tool with the given JSON input.
    ///
    /// Expected failures (missing file, failing command) come back as
    /// [`ToolResult::error`]. An `Err` means the input itself was unusable.
    async fn execute(&self, input: Value) -> Result<ToolResult>;
}

/// Holds the session's tools and dispatches calls by name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Called during startup.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            anyhow::bail!("Tool registered twice: {}", tool.name());
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Create a registry holding the tools of `toolset`.
    ///
    /// Relative paths given to file and shell tools resolve against `root`.
    pub fn for_toolset(toolset: Toolset, root: PathBuf) -> Result<Self> {
        let mut registry = Self::new();
        for name in toolset.tools() {
            let tool: Box<dyn Tool> = match name {
                ToolName::ReadFile => Box::new(ReadFileTool::new(root.clone())),
                ToolName::WriteFile => Box::new(WriteFileTool::new(root.clone())),
                ToolName::AppendFile => Box::new(AppendFileTool::new(root.clone())),
                ToolName::ExecuteCommand => Box::new(ExecuteCommandTool::new(root.clone())),
                ToolName::GetWeatherDetails => Box::new(WeatherTool),
            };
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Look up a tool by its wire name.
    pub fn lookup(&self, name: &str) -> Result<&dyn Tool, UnknownTool> {
        let wanted: ToolName = name.parse()?;
        self.tools
            .iter()
            .find(|t| t.name() == wanted)
            .map(|t| t.as_ref())
            .ok_or_else(|| UnknownTool {
                name: name.to_string(),
            })
    }

    /// Look up a tool and run it, flattening every outcome to a string.
    ///
    /// Only an unknown name is reported as an error. Anything that goes
    /// wrong inside the tool becomes an `Error: ...` string so it can be
    /// handed back to the model as an observation.
    pub async fn invoke(&self, name: &str, input: Value) -> Result<String, UnknownTool> {
        let tool = self.lookup(name)?;
        match tool.execute(input).await {
            Ok(result) => {
                if result.is_error {
                    tracing::debug!(tool = name, "tool reported failure");
                }
                Ok(result.content)
            }
            Err(e) => {
                tracing::debug!(tool = name, error = %e, "tool rejected input");
                Ok(format!("Error: {}", e))
            }
        }
    }

    pub fn names(&self) -> Vec<ToolName> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// The tool list as it appears in the system prompt, one per line.
    pub fn catalogue(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- function {} // {}", t.signature(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Resolve a tool-supplied path against the registry root.
fn resolve_path(root: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        root.join(path)
    }
}

/// Pull a single string argument out of a tool input.
///
/// Accepts the bare form (`"a.txt"`) shown in the catalogue as well as the
/// record form (`{"path": "a.txt"}`) that models sometimes produce.
fn string_arg(input: &Value, key: &str) -> Result<String> {
    match input {
        Value::String(s) => Ok(s.clone()),
        Value::Object(map) => match map.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => anyhow::bail!("expected a string \"{}\" field", key),
        },
        other => anyhow::bail!("expected a string {}, got {}", key, other),
    }
}

/// Truncate `output` to at most `TOOL_MAX_OUTPUT_SIZE` bytes, appending a
/// notice when truncation occurs.
fn cap_output(output: &str) -> String {
    if output.len() <= TOOL_MAX_OUTPUT_SIZE {
        return output.to_string();
    }
    let mut end = TOOL_MAX_OUTPUT_SIZE;
    while end > 0 && !output.is_char_boundary(end) {
        end -= 1;
    }
    format!(
        "{}\n... output truncated at {} bytes",
        &output[..end],
        TOOL_MAX_OUTPUT_SIZE
    )
}

/// `{path, content}` input shared by writeFile and appendFile.
#[derive(Deserialize)]
struct PathContentInput {
    path: String,
    content: String,
}

#[cfg(test)]
mod tests;
