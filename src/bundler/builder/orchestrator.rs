//! Main disk image orchestration.
//!
//! This module provides the [`DmgBuilder`] orchestrator that runs the
//! pipeline steps in order and reports the produced artifact.

use crate::bundler::{
    Result,
    dmg::{self, DiskSize},
    error::ErrorExt,
    settings::{ImageFormat, Settings},
    utils::fs,
};
use std::path::PathBuf;

use super::{
    checksum::calculate_sha256,
    tool_detection::{REQUIRED_TOOLS, ensure_available},
};

/// A disk image produced by [`DmgBuilder::build`].
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Path of the final image
    pub path: PathBuf,
    /// Volume name inside the image
    pub volume_name: String,
    /// Requested image format
    pub format: ImageFormat,
    /// Size of the image file in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the image file
    pub checksum: String,
    /// Disk size decision for the staged content
    pub disk_size: DiskSize,
    /// Presentation options that were requested but not applied
    pub unapplied_options: Vec<String>,
}

/// Main disk image orchestrator.
///
/// Runs the fixed step sequence:
/// 1. Check that the external tools are available
/// 2. Stage the source folder and extras into a temporary volume root
/// 3. Record Finder presentation options
/// 4. Fix permissions and strip `.fseventsd`
/// 5. Build the ISO9660 image
/// 6. Compress it into the final `.dmg`
/// 7. Remove the staging directory and the intermediate image
///
/// The first failing step aborts the run. Temporary artifacts are owned by
/// guards and are removed on every exit path.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_dmg::bundler::{DmgBuilder, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_path("MyApp.dmg")
///     .source_folder("build/MyApp")
///     .build()?;
///
/// let artifact = DmgBuilder::new(settings).build().await?;
/// println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DmgBuilder {
    settings: Settings,
}

impl DmgBuilder {
    /// Creates a new builder with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the builder settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the pipeline and returns the produced image.
    pub async fn build(&self) -> Result<BundledArtifact> {
        let settings = &self.settings;
        log::info!(
            "Creating DMG '{}' from {}",
            settings.volume_name(),
            settings.source_folder().display()
        );

        ensure_available(&REQUIRED_TOOLS)?;

        fs::create_dir_all(settings.output_dir(), false).await?;

        let staging = dmg::stage(settings).await?;
        let unapplied_options = dmg::apply_finder_layout(settings);
        dmg::finalize(&staging).await?;

        let disk_size = dmg::estimate_disk_size(
            staging.path(),
            settings.dmg_settings().disk_image_size_mb,
        )
        .await?;

        let iso_image = dmg::build_iso_image(settings, staging.path()).await?;
        dmg::convert_to_dmg(settings, &iso_image).await?;

        let iso_path = iso_image.to_path_buf();
        iso_image
            .close()
            .fs_context("removing intermediate image", &iso_path)?;
        staging.close()?;

        let output = settings.output_path();
        let size = tokio::fs::metadata(output)
            .await
            .fs_context("reading artifact metadata", output)?
            .len();
        let checksum = calculate_sha256(output).await?;

        Ok(BundledArtifact {
            path: output.to_path_buf(),
            volume_name: settings.volume_name().to_string(),
            format: settings.dmg_settings().format.clone(),
            size,
            checksum,
            disk_size,
            unapplied_options,
        })
    }
}
