//! Configuration structures for disk image creation.
//!
//! This module provides the configuration record populated from the command
//! line ([`DmgSettings`]), the resolved per-invocation [`Settings`], and a
//! builder that validates paths while constructing them.

mod builder;
mod core;
mod dmg;
mod format;
mod layout;

// Re-export all public types
pub use self::core::{DMG_EXTENSION, Settings, default_volume_name, has_dmg_extension};
pub use builder::SettingsBuilder;
pub use dmg::{DmgSettings, ToolVerbosity};
pub use format::{Compression, CompressionAlgorithm, ImageFormat};
pub use layout::{AddedFile, IconPlacement, Position, WindowSize};
