//! Shell command tool.

use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

use super::{cap_output, string_arg, Tool, ToolName, ToolResult};

use crate::constants::COMMAND_STRIPPED_ENV_VARS;

/// Tool that runs a command through `sh -c`.
///
/// The working directory is the registry root and API keys are removed from
/// the child's environment. The child is killed if the call is dropped,
/// which is how the agent's per-tool timeout takes effect.
pub struct ExecuteCommandTool {
    root: PathBuf,
}

impl ExecuteCommandTool {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait::async_trait]
impl Tool for ExecuteCommandTool {
    fn name(&self) -> ToolName {
        ToolName::ExecuteCommand
    }

    fn signature(&self) -> &str {
        "executeCommand(command: Str): Str"
    }

    fn description(&self) -> &str {
        "Runs a shell command and returns its stdout and stderr."
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let command = string_arg(&input, "command")?;

        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c").arg(&command);
        cmd.current_dir(&self.root);
        cmd.kill_on_drop(true);

        for var in COMMAND_STRIPPED_ENV_VARS {
            cmd.env_remove(var);
        }

        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());

        let child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => {
                return Ok(ToolResult::error(format!("❌ Command error: {}", e)));
            }
        };

        let output = match child.wait_with_output().await {
            Ok(output) => output,
            Err(e) => {
                return Ok(ToolResult::error(format!("❌ Command error: {}", e)));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            Ok(ToolResult::success(cap_output(&format!(
                "📤 STDOUT:\n{}\n📥 STDERR:\n{}",
                stdout, stderr
            ))))
        } else {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            Ok(ToolResult::error(cap_output(&format!(
                "❌ Command error: Command failed: {} (exit code {})\n{}",
                command,
                code,
                stderr.trim_end()
            ))))
        }
    }
}
