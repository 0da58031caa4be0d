//! Staging directory population.
//!
//! Mirrors the final volume root in a temporary directory:
//! - Copies the source tree with `rsync -a`
//! - Strips the root `.DS_Store` left over from the source folder
//! - Installs the background image, volume icon and extra files
//! - Creates the `Applications` / `QuickLook` drop links
//! - Clears group/other write bits and removes `.fseventsd`

use crate::bundler::{
    error::{Context, ErrorExt, Result},
    settings::Settings,
    utils::{fs, process::run_tool},
};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

/// Directory holding the background image inside the volume.
pub const BACKGROUND_DIR: &str = ".background";

/// File name Finder looks for as the custom volume icon.
pub const VOLUME_ICON_NAME: &str = ".VolumeIcon.icns";

/// Target of the `Applications` drop link.
pub const APPLICATIONS_TARGET: &str = "/Applications";

/// Target of the `QuickLook` drop link.
pub const QUICKLOOK_TARGET: &str = "/Library/QuickLook";

/// Temporary volume root. Removed from disk when dropped.
#[derive(Debug)]
pub struct StagingArea {
    root: PathBuf,
    dir: Option<TempDir>,
}

impl StagingArea {
    fn new(dir: TempDir) -> Self {
        Self {
            root: dir.path().to_path_buf(),
            dir: Some(dir),
        }
    }

    /// Root of the staged volume.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Removes the staging directory now, reporting failures.
    pub fn close(mut self) -> Result<()> {
        fs::restore_owner_write(&self.root)
            .with_context(|| format!("unlocking staging directory {}", self.root.display()))?;
        match self.dir.take() {
            Some(dir) => dir
                .close()
                .fs_context("removing staging directory", &self.root),
            None => Ok(()),
        }
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        // Runs before `dir` is dropped, so the TempDir removal can succeed.
        if self.dir.is_none() {
            return;
        }
        if let Err(e) = fs::restore_owner_write(&self.root) {
            log::warn!(
                "Could not unlock staging directory {}: {}",
                self.root.display(),
                e
            );
        }
    }
}

/// Creates the staging directory and fills it with everything that goes
/// into the image.
pub async fn stage(settings: &Settings) -> Result<StagingArea> {
    let dir = tempfile::Builder::new()
        .prefix(&staging_prefix(settings.volume_name()))
        .tempdir()
        .context("creating temporary staging directory")?;
    let staging = StagingArea::new(dir);
    let root = staging.path();

    log::info!(
        "Copying {} into {}",
        settings.source_folder().display(),
        root.display()
    );
    copy_source_tree(settings, root).await?;

    fs::remove_file(&root.join(".DS_Store")).await?;

    let dmg = settings.dmg_settings();

    if let Some(background) = &dmg.background {
        let file_name = background
            .file_name()
            .context("Invalid background image path")?;
        let dest = root.join(BACKGROUND_DIR).join(file_name);
        fs::copy_file(background, &dest)
            .await
            .with_context(|| format!("copying background image {}", background.display()))?;
        log::debug!("Copied background image to {}", dest.display());
    }

    if let Some(icon) = &dmg.volume_icon {
        let dest = root.join(VOLUME_ICON_NAME);
        fs::copy_file(icon, &dest)
            .await
            .with_context(|| format!("copying volume icon {}", icon.display()))?;
        log::debug!("Installed volume icon from {}", icon.display());
    }

    for added in &dmg.added_files {
        let dest = root.join(relative_to_volume(&added.name));
        fs::copy_path(&added.source, &dest).await.with_context(|| {
            format!(
                "adding {} as {}",
                added.source.display(),
                added.name.display()
            )
        })?;
        log::debug!("Added {} as {}", added.source.display(), dest.display());
    }

    if dmg.app_drop_link.is_some() {
        create_drop_link(root, "Applications", APPLICATIONS_TARGET)?;
    }
    if dmg.ql_drop_link.is_some() {
        create_drop_link(root, "QuickLook", QUICKLOOK_TARGET)?;
    }

    Ok(staging)
}

/// Final touches applied right before imaging.
pub async fn finalize(staging: &StagingArea) -> Result<()> {
    let root = staging.path();

    log::debug!("Fixing permissions under {}", root.display());
    fs::remove_group_other_write(root).await?;

    fs::remove_dir_all(&root.join(".fseventsd")).await?;

    Ok(())
}

async fn copy_source_tree(settings: &Settings, root: &Path) -> Result<()> {
    // Trailing separators make rsync copy the folder contents, not the folder.
    let mut source: OsString = settings.source_folder().as_os_str().to_owned();
    source.push("/");
    let mut dest: OsString = root.as_os_str().to_owned();
    dest.push("/");

    let mut args: Vec<OsString> = vec!["-a".into()];
    if let Some(flag) = settings.dmg_settings().verbosity.rsync_flag() {
        args.push(flag.into());
    }
    args.push(source);
    args.push(dest);

    run_tool("rsync", &args)
        .await
        .context("copying source folder into staging directory")?;
    Ok(())
}

#[cfg(unix)]
fn create_drop_link(root: &Path, name: &str, target: &str) -> Result<()> {
    let link = root.join(name);
    fs::symlink(Path::new(target), &link).fs_context("creating drop link", &link)?;
    log::debug!("Linked {} -> {}", link.display(), target);
    Ok(())
}

#[cfg(not(unix))]
fn create_drop_link(_root: &Path, name: &str, _target: &str) -> Result<()> {
    log::warn!("Drop link {} is not supported on this platform", name);
    Ok(())
}

/// Strips root and parent components so added files stay inside the volume.
fn relative_to_volume(name: &Path) -> PathBuf {
    name.components()
        .filter(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .collect()
}

/// Temp directory prefix derived from the volume name.
fn staging_prefix(volume_name: &str) -> String {
    let cleaned: String = volume_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}.", cleaned)
}
