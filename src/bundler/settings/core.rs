//! Core Settings struct and implementations.

use super::DmgSettings;
use std::path::{Path, PathBuf};

/// Extension every output path must carry.
pub const DMG_EXTENSION: &str = ".dmg";

/// Prefix of the intermediate image written next to the output.
const TEMP_IMAGE_PREFIX: &str = "rw.";

/// Resolved settings for one disk image build.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which
/// validates the paths and derives the volume name.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_dmg::bundler::{DmgSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_path("dist/MyApp.dmg")
///     .source_folder("dist/staging")
///     .dmg_settings(DmgSettings::default())
///     .build()?;
/// assert_eq!(settings.volume_name(), "MyApp");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute path of the final `.dmg`.
    output_path: PathBuf,

    /// Absolute path of the folder whose contents become the volume root.
    source_folder: PathBuf,

    /// Volume name, explicit or derived from the output file name.
    volume_name: String,

    /// Content and appearance options.
    dmg: DmgSettings,
}

impl Settings {
    pub(super) fn new(
        output_path: PathBuf,
        source_folder: PathBuf,
        volume_name: String,
        dmg: DmgSettings,
    ) -> Self {
        Self {
            output_path,
            source_folder,
            volume_name,
            dmg,
        }
    }

    /// Absolute path of the final image.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Absolute path of the source folder.
    pub fn source_folder(&self) -> &Path {
        &self.source_folder
    }

    /// Name of the volume inside the image.
    pub fn volume_name(&self) -> &str {
        &self.volume_name
    }

    /// Content and appearance options.
    pub fn dmg_settings(&self) -> &DmgSettings {
        &self.dmg
    }

    /// Directory the image is written into.
    pub fn output_dir(&self) -> &Path {
        self.output_path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// File name of the final image.
    pub fn dmg_file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Intermediate uncompressed image path: `rw.<name>.dmg` beside the output.
    pub fn temp_image_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("{}{}", TEMP_IMAGE_PREFIX, self.dmg_file_name()))
    }
}

/// Whether `path` ends with the literal `.dmg` suffix.
pub fn has_dmg_extension(path: &Path) -> bool {
    path.to_string_lossy().ends_with(DMG_EXTENSION)
}

/// Volume name derived from an output path: file name minus `.dmg`.
pub fn default_volume_name(output_path: &Path) -> String {
    let file_name = output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name
        .strip_suffix(DMG_EXTENSION)
        .unwrap_or(&file_name)
        .to_string()
}
