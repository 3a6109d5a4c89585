//! Command implementations for the cmdpack CLI
//!
//! Each command opens the project, calls the matching operation and renders
//! the plain data it returns.

pub mod completions;
pub mod helpers;
pub mod info;
pub mod init;
pub mod install;
pub mod list;
pub mod remove;
pub mod sync;
pub mod update;
pub mod version;
