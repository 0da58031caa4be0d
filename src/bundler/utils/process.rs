//! External tool execution with captured output.
//!
//! Every pipeline step that shells out goes through [`run_tool`] so that a
//! missing executable, a spawn failure and a nonzero exit are all reported
//! the same way.

use crate::bundler::error::{Error, Result};
use std::ffi::{OsStr, OsString};

/// Captured output of a successful tool run.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

/// Runs `tool` with `args`, waiting for it to exit.
///
/// Stdout and stderr are captured and forwarded to the log at debug level.
///
/// # Errors
///
/// - [`Error::ToolNotFound`] if the executable cannot be spawned because it does not exist
/// - [`Error::ToolFailed`] if it exits unsuccessfully
pub async fn run_tool<I, S>(tool: &str, args: I) -> Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();

    log::debug!(
        "Running: {} {}",
        tool,
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = tokio::process::Command::new(tool)
        .args(&args)
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolNotFound {
                tool: tool.to_string(),
            },
            _ => Error::GenericError(format!("Failed to execute {}: {}", tool, e)),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    for line in stdout.lines().chain(stderr.lines()) {
        log::debug!("[{}] {}", tool, line);
    }

    if !output.status.success() {
        return Err(Error::ToolFailed {
            tool: tool.to_string(),
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(ToolOutput { stdout, stderr })
}
