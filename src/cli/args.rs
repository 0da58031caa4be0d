//! Command line argument parsing and validation.
//!
//! This module provides comprehensive CLI argument parsing using clap,
//! with proper validation and conversion into [`Settings`].

use crate::bundler::{
    AddedFile, DmgSettings, IconPlacement, Position, Settings, SettingsBuilder, ToolVerbosity,
    WindowSize, settings::has_dmg_extension,
};
use crate::error::{BundlerError, CliError};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::str::FromStr;

/// Creates a compressed macOS disk image from a folder
#[derive(Parser, Debug)]
#[command(
    name = "create-dmg",
    version,
    about = "Creates a compressed macOS disk image (.dmg) from a source folder",
    long_about = "Creates a compressed macOS disk image (.dmg) from a source folder.

The folder contents are staged in a temporary directory together with the
optional background image, volume icon and extra files, imaged with
genisoimage and compressed with dmg.

Finder window options (--window-pos, --window-size, --icon, ...) are accepted
for compatibility and reported, but only take effect on macOS.

Usage:
  create-dmg MyApp.dmg build/MyApp
  create-dmg --volname \"My App\" --app-drop-link 400 120 MyApp.dmg build/MyApp
  create-dmg --format UDBZ --add-file README.txt docs/README.txt 10 20 MyApp.dmg build/MyApp

Exit code 0 = image guaranteed to exist at the output path."
)]
pub struct Args {
    /// Output disk image path, must end in .dmg
    #[arg(value_name = "OUTPUT.dmg")]
    pub output: Option<PathBuf>,

    /// Folder whose contents become the volume root
    #[arg(value_name = "SOURCE_FOLDER")]
    pub source_folder: Option<PathBuf>,

    /// Volume name (default: output file name without .dmg)
    #[arg(long, value_name = "NAME")]
    pub volname: Option<String>,

    /// Volume icon (.icns)
    #[arg(long, value_name = "ICNS")]
    pub volicon: Option<PathBuf>,

    /// Background image for the Finder window
    #[arg(long, value_name = "IMG")]
    pub background: Option<PathBuf>,

    /// Finder window position
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub window_pos: Option<Vec<i32>>,

    /// Finder window size
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub window_size: Option<Vec<u32>>,

    /// Label text size
    #[arg(long, value_name = "N")]
    pub text_size: Option<u32>,

    /// Icon size
    #[arg(long, value_name = "N")]
    pub icon_size: Option<u32>,

    /// Icon position of FILE (repeatable)
    #[arg(
        long,
        num_args = 3,
        value_names = ["FILE", "X", "Y"],
        action = ArgAction::Append,
        allow_negative_numbers = true
    )]
    pub icon: Vec<String>,

    /// Hide the extension of FILE (repeatable)
    #[arg(long, value_name = "FILE", action = ArgAction::Append)]
    pub hide_extension: Vec<String>,

    /// Add an Applications drop link at X Y
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub app_drop_link: Option<Vec<i32>>,

    /// Add a QuickLook drop link at X Y
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub ql_drop_link: Option<Vec<i32>>,

    /// License agreement to attach
    #[arg(long, value_name = "FILE")]
    pub eula: Option<PathBuf>,

    /// Do not set the internet-enable flag (deprecated, no effect)
    #[arg(long)]
    pub no_internet_enable: bool,

    /// Image format: UDZO (zlib, default), UDBZ (bzip2), ULFO, ULMO or other
    #[arg(long, value_name = "FORMAT", default_value = "UDZO")]
    pub format: String,

    /// Copy SRC into the image as NAME, icon at X Y (repeatable)
    #[arg(
        long = "add-file",
        visible_alias = "add-folder",
        num_args = 4,
        value_names = ["NAME", "SRC", "X", "Y"],
        action = ArgAction::Append,
        allow_negative_numbers = true
    )]
    pub add_file: Vec<String>,

    /// Disk image size in megabytes
    #[arg(long, value_name = "MB")]
    pub disk_image_size: Option<u64>,

    /// Verbose output from the imaging tools
    #[arg(long, overrides_with = "hdiutil_quiet")]
    pub hdiutil_verbose: bool,

    /// Quiet imaging tools and progress output
    #[arg(long, overrides_with = "hdiutil_verbose")]
    pub hdiutil_quiet: bool,

    /// Bless the volume (macOS only)
    #[arg(long)]
    pub bless: bool,

    /// Avoid Finder scripting
    #[arg(long)]
    pub sandbox_safe: bool,

    /// Skip the Finder prettifying step
    #[arg(long)]
    pub skip_jenkins: bool,

    /// Print only the version number
    #[arg(long)]
    pub pure_version: bool,
}

impl Args {
    /// Validate arguments for consistency.
    ///
    /// Runs before anything touches the filesystem.
    pub fn validate(&self) -> Result<(), CliError> {
        let output = self.output.as_ref().ok_or_else(|| CliError::MissingArgument {
            argument: "<output.dmg>".to_string(),
        })?;
        if self.source_folder.is_none() {
            return Err(CliError::MissingArgument {
                argument: "<source_folder>".to_string(),
            });
        }

        if !has_dmg_extension(output) {
            return Err(CliError::InvalidArguments {
                reason: format!(
                    "Output file name must end with a .dmg extension: {}",
                    output.display()
                ),
            });
        }

        Ok(())
    }

    /// Tool verbosity selected by `--hdiutil-verbose` / `--hdiutil-quiet`.
    pub fn verbosity(&self) -> ToolVerbosity {
        if self.hdiutil_quiet {
            ToolVerbosity::Quiet
        } else if self.hdiutil_verbose {
            ToolVerbosity::Verbose
        } else {
            ToolVerbosity::Normal
        }
    }

    /// Collects the flags into a [`DmgSettings`] record.
    pub fn dmg_settings(&self) -> Result<DmgSettings, CliError> {
        let icons = self
            .icon
            .chunks(3)
            .map(|chunk| -> Result<IconPlacement, CliError> {
                match chunk {
                    [file, x, y] => Ok(IconPlacement {
                        file: file.clone(),
                        position: parse_position("--icon", x, y)?,
                    }),
                    _ => Err(invalid("--icon expects FILE X Y")),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let added_files = self
            .add_file
            .chunks(4)
            .map(|chunk| -> Result<AddedFile, CliError> {
                match chunk {
                    [name, source, x, y] => Ok(AddedFile {
                        name: PathBuf::from(name),
                        source: PathBuf::from(source),
                        position: parse_position("--add-file", x, y)?,
                    }),
                    _ => Err(invalid("--add-file expects NAME SRC X Y")),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DmgSettings {
            volume_name: self.volname.clone(),
            volume_icon: self.volicon.clone(),
            background: self.background.clone(),
            window_position: last_pair(&self.window_pos).map(|(x, y)| Position::new(x, y)),
            window_size: last_pair(&self.window_size).map(|(w, h)| WindowSize::new(w, h)),
            text_size: self.text_size,
            icon_size: self.icon_size,
            icons,
            hide_extensions: self.hide_extension.clone(),
            app_drop_link: last_pair(&self.app_drop_link).map(|(x, y)| Position::new(x, y)),
            ql_drop_link: last_pair(&self.ql_drop_link).map(|(x, y)| Position::new(x, y)),
            eula: self.eula.clone(),
            skip_internet_enable: self.no_internet_enable,
            format: self.format.parse().unwrap_or_default(),
            added_files,
            disk_image_size_mb: self.disk_image_size,
            verbosity: self.verbosity(),
            sandbox_safe: self.sandbox_safe,
            bless: self.bless,
            skip_jenkins: self.skip_jenkins,
        })
    }

    /// Validates the arguments and resolves them into [`Settings`].
    pub fn into_settings(self) -> Result<Settings, BundlerError> {
        self.validate()?;
        let dmg = self.dmg_settings()?;

        let mut builder = SettingsBuilder::new().dmg_settings(dmg);
        if let Some(output) = &self.output {
            builder = builder.output_path(output);
        }
        if let Some(source) = &self.source_folder {
            builder = builder.source_folder(source);
        }
        Ok(builder.build()?)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.hdiutil_verbose, args.hdiutil_quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print a plain message if not in quiet mode
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.output.info(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

fn invalid(reason: &str) -> CliError {
    CliError::InvalidArguments {
        reason: reason.to_string(),
    }
}

fn parse_coordinate<T: FromStr>(flag: &str, axis: &str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidArguments {
        reason: format!("{}: invalid {} coordinate '{}'", flag, axis, value),
    })
}

fn parse_position(flag: &str, x: &str, y: &str) -> Result<Position, CliError> {
    Ok(Position::new(
        parse_coordinate(flag, "X", x)?,
        parse_coordinate(flag, "Y", y)?,
    ))
}

/// Last value pair of a repeatable two-value flag.
fn last_pair<T: Copy>(values: &Option<Vec<T>>) -> Option<(T, T)> {
    match values.as_deref() {
        Some([.., a, b]) => Some((*a, *b)),
        _ => None,
    }
}
