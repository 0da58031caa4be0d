//! Comprehensive error types for create-dmg.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all create-dmg operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("{reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Not enough arguments: missing {argument}. Run 'create-dmg --help' for help.")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl BundlerError {
    /// Process exit code for this error.
    ///
    /// A failing external tool propagates its own exit code; everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundlerError::Bundler(e) => e.tool_exit_code().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            BundlerError::Cli(_) => vec!["Run 'create-dmg --help' to see the usage".to_string()],
            BundlerError::Bundler(Error::ToolNotFound { tool }) => vec![format!(
                "Install `{}` and make sure it is on PATH (genisoimage and libdmg-hfsplus provide the imaging tools)",
                tool
            )],
            BundlerError::Bundler(Error::Fs { path, .. }) => {
                vec![format!("Check that {} is accessible", path.display())]
            }
            _ => Vec::new(),
        }
    }
}
