//! Resolution of what an install should produce
//!
//! - [`version`]: which ref gets checked out and recorded
//! - [`identity`]: which installed command, if any, already came from a repository

pub mod identity;
pub mod version;

pub use identity::find_existing_by_repository;
pub use version::{VersionResolver, is_commit_hash};
