//! Command source handling
//!
//! This module turns the free-form repository strings users type into
//! something the rest of the engine can reason about:
//! - GitHub shorthand: `owner/repo`, `github:owner/repo`
//! - HTTPS URLs: `https://github.com/owner/repo.git`
//! - SSH URLs: `git@github.com:owner/repo.git`, `ssh://git@host/owner/repo.git`
//! - Local paths and `file://` URLs (mostly useful for testing)
//!
//! Any of the above may carry a version suffix: `owner/repo@v1.0.0`.
//!
//! ## Module Organization
//!
//! - `spec.rs`: `CommandSpec` and the `@version` splitting heuristics
//! - `repository.rs`: repository normalization, clone URLs and command names

pub mod repository;
pub mod spec;

pub use spec::CommandSpec;
