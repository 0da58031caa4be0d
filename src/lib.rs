//! Disk image bundler library for creating macOS `.dmg` files on Linux hosts.
//!
//! This library stages a source folder (plus optional background image,
//! volume icon and extra files) into a temporary volume root, images it with
//! `genisoimage` and compresses the result with `dmg`.
//!
//! It can be used both as a CLI tool (`create-dmg`) and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
