//! Disk image creation steps.
//!
//! Creates drag-to-install DMG files on hosts without `hdiutil`, using
//! `rsync`, `genisoimage` and the `dmg` converter.
//!
//! # Architecture
//!
//! This module is organized into logical submodules:
//! - `staging` - Temporary volume root and everything copied into it
//! - `customization` - Finder presentation options (reported, not applied)
//! - `conversion` - ISO9660 image creation and DMG compression
//! - `sizing` - Disk size estimate for the staged content

mod conversion;
mod customization;
mod sizing;
mod staging;

pub use conversion::{build_iso_image, convert_to_dmg};
pub use customization::{apply_finder_layout, unapplied_options};
pub use sizing::{DiskSize, HEADROOM_MB, estimate_disk_size};
pub use staging::{
    APPLICATIONS_TARGET, BACKGROUND_DIR, QUICKLOOK_TARGET, StagingArea, VOLUME_ICON_NAME,
    finalize, stage,
};
