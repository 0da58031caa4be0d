//! Disk image orchestration and coordination.
//!
//! This module provides the main [`DmgBuilder`] orchestrator that drives the
//! staging, imaging and compression steps and reports the result as a
//! [`BundledArtifact`].
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the produced image
//! - [`orchestrator`] - Main [`DmgBuilder`] struct and pipeline sequencing
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::{BundledArtifact, DmgBuilder};
