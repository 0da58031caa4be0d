//! Command line interface for create-dmg.
//!
//! This module provides the CLI entry point, with argument parsing,
//! pipeline execution, and user feedback.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::DmgBuilder;
use crate::error::Result;
use clap::Parser;
use std::ffi::OsString;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    run_from(std::env::args_os()).await
}

/// Runs the CLI with explicit arguments (first item is the program name).
///
/// Help and version output return exit code 0; any parse failure returns 1.
pub async fn run_from<I, T>(argv: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => {
            let code = if e.exit_code() == 0 { 0 } else { 1 };
            e.print()?;
            return Ok(code);
        }
    };

    if args.pure_version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let runtime_config = RuntimeConfig::from(&args);
    let builder = DmgBuilder::new(args.into_settings()?);
    let settings = builder.settings();

    runtime_config.progress(&format!(
        "Creating disk image {} (volume '{}')...",
        settings.output_path().display(),
        settings.volume_name()
    ))?;
    runtime_config.verbose_println(&format!(
        "Source folder: {}",
        settings.source_folder().display()
    ))?;

    let artifact = builder.build().await?;

    if !artifact.unapplied_options.is_empty() {
        runtime_config.warn("Finder layout options only take effect on macOS:")?;
        for option in &artifact.unapplied_options {
            runtime_config.indent(option)?;
        }
    }

    runtime_config.verbose_println(&format!(
        "Disk size: {} MB{}",
        artifact.disk_size.size_mb,
        if artifact.disk_size.overridden {
            " (from --disk-image-size)"
        } else {
            ""
        }
    ))?;
    runtime_config.verbose_println(&format!("SHA256: {}", artifact.checksum))?;
    runtime_config.success(&format!(
        "Disk image done: {} ({} bytes)",
        artifact.path.display(),
        artifact.size
    ))?;
    runtime_config.info(&format!(
        "Volume '{}', format {}",
        artifact.volume_name, artifact.format
    ))?;

    Ok(0)
}
