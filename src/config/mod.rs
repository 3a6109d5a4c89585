//! Configuration file handling for cmdpack
//!
//! This module contains data structures for:
//! - `cmdpack.yaml` at the project root - desired state
//! - `cmdpack.lock` - what is actually installed
//! - `cmdpack.yaml` inside each command - command metadata

pub mod lockfile;
pub mod metadata;
pub mod project;
pub mod utils;

// Re-export commonly used types
pub use lockfile::{InstallRecord, LockEntry, Lockfile};
pub use metadata::CommandMetadata;
pub use project::ProjectConfig;
