//! Finder window geometry and item placement.

use std::fmt;
use std::path::PathBuf;

/// Point in Finder window coordinates (pixels from the top-left corner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Horizontal offset
    pub x: i32,
    /// Vertical offset
    pub y: i32,
}

impl Position {
    /// Creates a position from its coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Finder window size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl WindowSize {
    /// Creates a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Icon position for one item in the image root (`--icon FILE X Y`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconPlacement {
    /// Item name relative to the volume root
    pub file: String,
    /// Icon position inside the window
    pub position: Position,
}

/// Extra file or folder copied into the image root (`--add-file NAME SRC X Y`).
///
/// `name` is the destination relative to the volume root; `source` is copied
/// there verbatim (folders recursively, symlinks preserved).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddedFile {
    /// Destination name inside the image
    pub name: PathBuf,
    /// File or folder to copy
    pub source: PathBuf,
    /// Icon position inside the window
    pub position: Position,
}
