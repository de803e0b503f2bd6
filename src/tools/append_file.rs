//! Append-file tool: adds content to the end of a file, creating it if absent.

use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::{resolve_path, PathContentInput, Tool, ToolName, ToolResult};

pub struct AppendFileTool {
    /// Relative paths are resolved against this directory.
    root: PathBuf,
}

impl AppendFileTool {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

async fn append(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await
}

#[async_trait::async_trait]
impl Tool for AppendFileTool {
    fn name(&self) -> ToolName {
        ToolName::AppendFile
    }

    fn signature(&self) -> &str {
        "appendFile({ path: Str, content: Str }): Str"
    }

    fn description(&self) -> &str {
        "Appends content to the end of the file at path."
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: PathContentInput = serde_json::from_value(input)?;
        let resolved = resolve_path(&self.root, &input.path);

        match append(&resolved, &input.content).await {
            Ok(()) => Ok(ToolResult::success(format!(
                "✅ Content appended successfully to {}",
                input.path
            ))),
            Err(e) => Ok(ToolResult::error(format!(
                "Error appending to file: {}",
                e
            ))),
        }
    }
}
