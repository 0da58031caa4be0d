//! Disk image content and appearance settings.

use super::{AddedFile, IconPlacement, ImageFormat, Position, WindowSize};
use std::path::PathBuf;

/// How chatty the external tools should be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolVerbosity {
    /// Tool defaults
    #[default]
    Normal,
    /// `--hdiutil-verbose`
    Verbose,
    /// `--hdiutil-quiet`
    Quiet,
}

impl ToolVerbosity {
    /// Extra flag for `rsync`.
    pub fn rsync_flag(&self) -> Option<&'static str> {
        match self {
            ToolVerbosity::Normal => None,
            ToolVerbosity::Verbose => Some("-v"),
            ToolVerbosity::Quiet => Some("-q"),
        }
    }

    /// Extra flag for `genisoimage`.
    pub fn genisoimage_flag(&self) -> Option<&'static str> {
        match self {
            ToolVerbosity::Normal => None,
            ToolVerbosity::Verbose => Some("-v"),
            ToolVerbosity::Quiet => Some("-quiet"),
        }
    }
}

/// Disk image configuration.
///
/// Collects everything a single `create-dmg` invocation asks for. Fields that
/// only affect Finder presentation (window geometry, icon layout, EULA,
/// bless) are carried so they can be reported, but they are not applied on
/// Linux hosts.
///
/// # See Also
///
/// - [`Settings`](super::Settings) - Adds the output and source paths
#[derive(Clone, Debug, Default)]
pub struct DmgSettings {
    /// Volume name. Defaults to the output file name without `.dmg`.
    pub volume_name: Option<String>,

    /// `.icns` file installed as `.VolumeIcon.icns`.
    pub volume_icon: Option<PathBuf>,

    /// Background image copied into `.background/`.
    pub background: Option<PathBuf>,

    /// Finder window origin.
    pub window_position: Option<Position>,

    /// Finder window size.
    pub window_size: Option<WindowSize>,

    /// Label text size.
    pub text_size: Option<u32>,

    /// Icon size.
    pub icon_size: Option<u32>,

    /// Per-item icon positions.
    pub icons: Vec<IconPlacement>,

    /// Items whose extension should be hidden.
    pub hide_extensions: Vec<String>,

    /// Position of the `Applications` drop link. Creates the link when set.
    pub app_drop_link: Option<Position>,

    /// Position of the `QuickLook` drop link. Creates the link when set.
    pub ql_drop_link: Option<Position>,

    /// License agreement to attach to the image.
    pub eula: Option<PathBuf>,

    /// `--no-internet-enable` was given.
    pub skip_internet_enable: bool,

    /// Final image format.
    pub format: ImageFormat,

    /// Extra files and folders copied into the image root.
    pub added_files: Vec<AddedFile>,

    /// Image size override in megabytes.
    pub disk_image_size_mb: Option<u64>,

    /// External tool verbosity.
    pub verbosity: ToolVerbosity,

    /// Avoid Finder scripting entirely.
    pub sandbox_safe: bool,

    /// Bless the volume so it opens automatically.
    pub bless: bool,

    /// Skip the Finder prettifying step.
    pub skip_jenkins: bool,
}
