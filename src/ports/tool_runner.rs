use std::ffi::OsString;
use std::path::Path;

use crate::error::ToolError;

/// Capability to run an external tool and wait for it to finish
///
/// The exit status is the only signal consumed: success means the tool's
/// side effects (files, on-device state) are in place, any non-zero status
/// is fatal to the whole ceremony. There is no retry and no timeout; a hung
/// tool hangs the attended ceremony, which the operator resolves.
pub trait ToolRunner {
    /// Run `tool` with `args`, blocking until it exits
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Launch` if the process cannot be started,
    /// `ToolError::Failed` on a non-zero exit status and
    /// `ToolError::Terminated` if the process died to a signal.
    fn run(&self, tool: &Path, args: &[OsString]) -> Result<(), ToolError>;
}
