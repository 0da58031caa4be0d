//! Builder for constructing Settings.

use super::{DmgSettings, Settings, core};
use crate::bail;
use crate::bundler::error::{Context, ErrorExt};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building disk image settings with validation.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_dmg::bundler::{DmgSettings, ImageFormat, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_path("MyApp.dmg")
///     .source_folder("build/MyApp")
///     .dmg_settings(DmgSettings {
///         volume_name: Some("My App".into()),
///         format: ImageFormat::Udbz,
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    output_path: Option<PathBuf>,
    source_folder: Option<PathBuf>,
    dmg_settings: DmgSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the output image path.
    ///
    /// # Required
    ///
    /// This field is required for building. It must end in `.dmg`.
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the folder whose contents become the volume root.
    ///
    /// # Required
    ///
    /// This field is required for building. It must be an existing directory.
    pub fn source_folder<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_folder = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets content and appearance options.
    ///
    /// Default: [`DmgSettings::default`]
    pub fn dmg_settings(mut self, settings: DmgSettings) -> Self {
        self.dmg_settings = settings;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `output_path` or `source_folder` is missing
    /// - the output path does not end in `.dmg`
    /// - the source folder does not exist or is not a directory
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let output_path = self.output_path.context("output_path is required")?;
        let source_folder = self.source_folder.context("source_folder is required")?;

        if !core::has_dmg_extension(&output_path) {
            bail!(
                "Output file name must end with a {} extension: {}",
                core::DMG_EXTENSION,
                output_path.display()
            );
        }

        if !source_folder.is_dir() {
            bail!(
                "Source folder does not exist or is not a directory: {}",
                source_folder.display()
            );
        }

        let output_path = output_path
            .absolutize()
            .fs_context("resolving output path", &output_path)?
            .into_owned();
        let source_folder = source_folder
            .absolutize()
            .fs_context("resolving source folder", &source_folder)?
            .into_owned();

        let volume_name = match &self.dmg_settings.volume_name {
            Some(name) => name.clone(),
            None => core::default_volume_name(&output_path),
        };

        Ok(Settings::new(
            output_path,
            source_folder,
            volume_name,
            self.dmg_settings,
        ))
    }
}
