//! Disk image format names and the compression they select.
//!
//! Format names follow `hdiutil` conventions (`UDZO`, `UDBZ`, ...). On Linux
//! the name only decides which compression parameters are handed to the
//! `dmg` converter.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Final image format requested with `--format`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// zlib-compressed (default)
    #[default]
    Udzo,
    /// bzip2-compressed
    Udbz,
    /// lzfse-compressed
    Ulfo,
    /// lzma-compressed
    Ulmo,
    /// Any other name, passed through without compression parameters
    Other(String),
}

impl ImageFormat {
    /// The `hdiutil`-style format name.
    pub fn name(&self) -> &str {
        match self {
            ImageFormat::Udzo => "UDZO",
            ImageFormat::Udbz => "UDBZ",
            ImageFormat::Ulfo => "ULFO",
            ImageFormat::Ulmo => "ULMO",
            ImageFormat::Other(name) => name,
        }
    }

    /// Compression parameters for this format, if it defines any.
    pub fn compression(&self) -> Option<Compression> {
        match self {
            ImageFormat::Udzo => Some(Compression::new(CompressionAlgorithm::Zlib, Some(9))),
            ImageFormat::Udbz => Some(Compression::new(CompressionAlgorithm::Bzip2, Some(9))),
            ImageFormat::Ulfo => Some(Compression::new(CompressionAlgorithm::Lzfse, None)),
            ImageFormat::Ulmo => Some(Compression::new(CompressionAlgorithm::Lzma, None)),
            ImageFormat::Other(_) => None,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "UDZO" => ImageFormat::Udzo,
            "UDBZ" => ImageFormat::Udbz,
            "ULFO" => ImageFormat::Ulfo,
            "ULMO" => ImageFormat::Ulmo,
            other => ImageFormat::Other(other.to_string()),
        })
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compression algorithm understood by the `dmg` converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionAlgorithm {
    /// Deflate
    Zlib,
    /// bzip2
    Bzip2,
    /// Apple LZFSE
    Lzfse,
    /// LZMA
    Lzma,
}

impl CompressionAlgorithm {
    /// Lowercase name as used on the converter command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionAlgorithm::Zlib => "zlib",
            CompressionAlgorithm::Bzip2 => "bzip2",
            CompressionAlgorithm::Lzfse => "lzfse",
            CompressionAlgorithm::Lzma => "lzma",
        }
    }
}

/// Algorithm plus optional level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compression {
    /// Algorithm
    pub algorithm: CompressionAlgorithm,
    /// Level, `None` for the algorithm default
    pub level: Option<u8>,
}

impl Compression {
    /// Creates compression parameters.
    pub fn new(algorithm: CompressionAlgorithm, level: Option<u8>) -> Self {
        Self { algorithm, level }
    }

    /// `hdiutil -imagekey` equivalent, e.g. `zlib-level=9`.
    pub fn image_key(&self) -> Option<String> {
        self.level
            .map(|level| format!("{}-level={}", self.algorithm.as_str(), level))
    }

    /// Arguments appended to `dmg dmg IN OUT`.
    pub fn converter_args(&self) -> Vec<String> {
        let mut args = vec![
            "--compression".to_string(),
            self.algorithm.as_str().to_string(),
        ];
        if let Some(level) = self.level {
            args.push("--level".to_string());
            args.push(level.to_string());
        }
        args
    }
}
