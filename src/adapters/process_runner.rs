//! External tool invocation via `std::process`

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::ToolError;
use crate::ports::ToolRunner;

/// Runs external tools as blocking child processes
///
/// Argument vectors are not logged: they carry the operator PIN.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, tool: &Path, args: &[OsString]) -> Result<(), ToolError> {
        let tool_name = display_name(tool);
        debug!(tool = %tool_name, "invoking external tool");

        let status = Command::new(tool)
            .args(args)
            .status()
            .map_err(|source| ToolError::Launch {
                tool: tool_name.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ToolError::Failed {
                tool: tool_name,
                code,
            }),
            None => Err(ToolError::Terminated { tool: tool_name }),
        }
    }
}

fn display_name(tool: &Path) -> String {
    tool.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| tool.display().to_string())
}
