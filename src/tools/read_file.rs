use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

use super::{cap_output, resolve_path, string_arg, Tool, ToolName, ToolResult};

pub struct ReadFileTool {
    /// Relative paths are resolved against this directory.
    root: PathBuf,
}

impl ReadFileTool {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait::async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> ToolName {
        ToolName::ReadFile
    }

    fn signature(&self) -> &str {
        "readFile(path: Str): Str"
    }

    fn description(&self) -> &str {
        "Returns the UTF-8 contents of the file at path (large files are truncated)."
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let path = string_arg(&input, "path")?;
        let resolved = resolve_path(&self.root, &path);

        match tokio::fs::read_to_string(&resolved).await {
            Ok(text) => Ok(ToolResult::success(cap_output(&text))),
            Err(e) => Ok(ToolResult::error(format!("Error reading file: {}", e))),
        }
    }
}
