//! Image building and compression.
//!
//! Two steps turn the staged volume into the final container:
//! - `genisoimage` writes an uncompressed ISO9660 image with Rock Ridge and
//!   Apple extensions to `rw.<name>.dmg` beside the output
//! - `dmg` converts that image into a compressed UDIF container
//!
//! The intermediate image is held in a [`TempPath`] so it is deleted however
//! the run ends.

use crate::bail;
use crate::bundler::{
    error::{Context, ErrorExt, Result},
    settings::Settings,
    utils::{fs, process::run_tool},
};
use std::ffi::OsString;
use std::path::Path;
use tempfile::TempPath;

/// Builds the uncompressed intermediate image from the staging directory.
pub async fn build_iso_image(settings: &Settings, staging_dir: &Path) -> Result<TempPath> {
    let image_path = settings.temp_image_path();
    fs::remove_file(&image_path).await?;

    // Guard before the tool runs so a partial image is cleaned up too.
    let image = TempPath::try_from_path(&image_path)
        .fs_context("guarding intermediate image", &image_path)?;

    log::info!("Creating ISO image {}", image_path.display());
    run_tool("genisoimage", iso_args(settings, staging_dir, &image_path))
        .await
        .context("building ISO image from staging directory")?;

    if !image_path.is_file() {
        bail!(
            "genisoimage exited successfully but produced no image at {}",
            image_path.display()
        );
    }

    Ok(image)
}

/// Compresses the intermediate image into the final `.dmg`.
pub async fn convert_to_dmg(settings: &Settings, iso_image: &Path) -> Result<()> {
    let output = settings.output_path();
    fs::remove_file(output).await?;

    let format = &settings.dmg_settings().format;
    match format.compression().and_then(|c| c.image_key()) {
        Some(key) => log::info!("Compressing image as {} ({})", format, key),
        None => log::info!("Compressing image as {}", format),
    }

    run_tool("dmg", convert_args(settings, iso_image))
        .await
        .context("converting ISO image to DMG")?;

    if !output.is_file() {
        bail!(
            "dmg exited successfully but produced no image at {}",
            output.display()
        );
    }

    log::info!("✓ Created DMG: {}", output.display());
    Ok(())
}

fn iso_args(settings: &Settings, staging_dir: &Path, image_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-V".into(),
        settings.volume_name().into(),
        "-D".into(),
        "-R".into(),
        "-apple".into(),
        "-no-pad".into(),
    ];
    if let Some(flag) = settings.dmg_settings().verbosity.genisoimage_flag() {
        args.push(flag.into());
    }
    args.push("-o".into());
    args.push(image_path.into());
    args.push(staging_dir.into());
    args
}

fn convert_args(settings: &Settings, iso_image: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "dmg".into(),
        iso_image.into(),
        settings.output_path().into(),
    ];
    if let Some(compression) = settings.dmg_settings().format.compression() {
        args.extend(compression.converter_args().into_iter().map(OsString::from));
    }
    args
}
