//! External tool detection and availability checking.
//!
//! The pipeline needs `rsync`, `genisoimage` and `dmg` on `PATH`. Checking
//! up front gives one clear error instead of failing halfway through staging.

use crate::bundler::error::{Error, Result};
use std::path::PathBuf;

/// Executables the pipeline invokes, in the order they run.
pub const REQUIRED_TOOLS: [&str; 3] = ["rsync", "genisoimage", "dmg"];

/// Resolves `tool` through `PATH`.
pub fn locate(tool: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(Error::ToolNotFound {
                tool: tool.to_string(),
            })
        }
    }
}

/// Fails with [`Error::ToolNotFound`] for the first missing tool.
pub fn ensure_available(tools: &[&str]) -> Result<()> {
    for tool in tools {
        locate(tool)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_named() {
        let err = ensure_available(&["no-such-dmg-tool-123"]).unwrap_err();
        assert!(err.to_string().contains("no-such-dmg-tool-123"));
    }

    #[cfg(unix)]
    #[test]
    fn shell_is_found() {
        assert!(locate("sh").is_ok());
    }
}
