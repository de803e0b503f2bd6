//! Write-file tool: replaces a file's contents, creating parent directories as needed.

use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;

use super::{resolve_path, PathContentInput, Tool, ToolName, ToolResult};

/// Tool that writes string content to a file.
///
/// Existing files are truncated. Missing parent directories are created
/// first. Filesystem failures are reported in the result text, never as
/// an `Err`.
pub struct WriteFileTool {
    /// Relative paths are resolved against this directory.
    root: PathBuf,
}

impl WriteFileTool {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait::async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> ToolName {
        ToolName::WriteFile
    }

    fn signature(&self) -> &str {
        "writeFile({ path: Str, content: Str }): Str"
    }

    fn description(&self) -> &str {
        "Creates or overwrites the file at path with content."
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: PathContentInput = serde_json::from_value(input)?;
        let resolved = resolve_path(&self.root, &input.path);

        if let Some(parent) = resolved.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return Ok(ToolResult::error(format!("Error writing file: {}", e)));
            }
        }

        match tokio::fs::write(&resolved, &input.content).await {
            Ok(()) => Ok(ToolResult::success(format!(
                "✅ File written successfully to {}",
                input.path
            ))),
            Err(e) => Ok(ToolResult::error(format!("Error writing file: {}", e))),
        }
    }
}
