//! Disk size estimation.

use crate::bundler::{error::Result, utils::fs};
use std::path::Path;

/// Megabytes added on top of the staged content.
pub const HEADROOM_MB: u64 = 20;

const MB: u64 = 1024 * 1024;

/// Size decision for one image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiskSize {
    /// Staged content in megabytes, rounded up.
    pub content_mb: u64,
    /// Size that will be used: the override or content plus headroom.
    pub size_mb: u64,
    /// Whether `size_mb` came from `--disk-image-size`.
    pub overridden: bool,
}

impl DiskSize {
    /// Combines measured content with an optional override.
    pub fn new(content_bytes: u64, override_mb: Option<u64>) -> Self {
        let content_mb = content_bytes.div_ceil(MB);
        match override_mb {
            Some(size_mb) => Self {
                content_mb,
                size_mb,
                overridden: true,
            },
            None => Self {
                content_mb,
                size_mb: content_mb + HEADROOM_MB,
                overridden: false,
            },
        }
    }

    /// An override too small for the staged content.
    pub fn is_too_small(&self) -> bool {
        self.size_mb < self.content_mb
    }
}

/// Measures the staged tree and applies the override.
///
/// ISO images size themselves, so an undersized override only warns.
pub async fn estimate_disk_size(staging_dir: &Path, override_mb: Option<u64>) -> Result<DiskSize> {
    let bytes = fs::dir_size(staging_dir).await?;
    let size = DiskSize::new(bytes, override_mb);

    if size.is_too_small() {
        log::warn!(
            "--disk-image-size {} MB is smaller than the staged content ({} MB)",
            size.size_mb,
            size.content_mb
        );
    } else {
        log::debug!(
            "Disk image size: {} MB (content {} MB)",
            size.size_mb,
            size.content_mb
        );
    }

    Ok(size)
}
