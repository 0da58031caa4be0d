//! Error types for disk image bundling.
//!
//! Provides the bundler [`Error`] enum plus two extension traits used
//! throughout the pipeline:
//! - [`Context`] attaches a human-readable message to any failure (including `None`)
//! - [`ErrorExt`] ties I/O failures to the path and operation that caused them

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while staging and converting a disk image.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form error message
    #[error("{0}")]
    GenericError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Directory traversal errors
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix errors while mapping staged paths
    #[error("Path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Filesystem operation failed on a specific path
    #[error("failed {context} ({}): {source}", .path.display())]
    Fs {
        /// Operation that was in progress
        context: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Required external executable is not on PATH
    #[error("required tool `{tool}` not found in PATH")]
    ToolNotFound {
        /// Executable name
        tool: String,
    },

    /// External tool ran and exited unsuccessfully
    #[error("{tool} failed with {}: {stderr}", describe_exit(.code))]
    ToolFailed {
        /// Executable name
        tool: String,
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Error wrapped with additional context
    #[error("{context}: {source}")]
    Context {
        /// Description of what was being attempted
        context: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Attach context to a fallible value.
pub trait Context<T> {
    /// Wrap the error (or `None`) with a static message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error (or `None`) with a lazily built message.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e),
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context {
            context: f().to_string(),
            source: Box::new(e),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Tie an IO failure to the operation and path that produced it.
pub trait ErrorExt<T> {
    /// Map the IO error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

impl Error {
    /// Exit code of the failed external tool, if this error came from one.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Error::ToolFailed { code, .. } => *code,
            Error::Context { source, .. } => source
                .downcast_ref::<Error>()
                .and_then(Error::tool_exit_code),
            _ => None,
        }
    }
}
