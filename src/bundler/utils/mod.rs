//! Filesystem and process helpers shared by the pipeline steps.

pub mod fs;
pub mod process;
