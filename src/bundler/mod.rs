//! Disk image bundler.
//!
//! Turns a source folder into a compressed macOS disk image using tools
//! available on Linux hosts.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_dmg::bundler::{DmgBuilder, DmgSettings, ImageFormat, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_dmg::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .output_path("dist/MyApp.dmg")
//!     .source_folder("build/MyApp")
//!     .dmg_settings(DmgSettings {
//!         format: ImageFormat::Udbz,
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let artifact = DmgBuilder::new(settings).build().await?;
//! println!("{} ({})", artifact.path.display(), artifact.checksum);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod dmg;
pub mod error;
pub mod settings;
pub mod utils;

pub use builder::{BundledArtifact, DmgBuilder};
pub use error::{Error, Result};
pub use settings::{
    AddedFile, Compression, CompressionAlgorithm, DmgSettings, IconPlacement, ImageFormat,
    Position, Settings, SettingsBuilder, ToolVerbosity, WindowSize,
};
