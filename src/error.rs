//! Error types and handling for cmdpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Variants are grouped by the taxonomy the engine reports on:
//! input, not-found, already-exists, remote, structural and local I/O.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cmdpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum CmdpackError {
    // Input errors
    #[error("Invalid repository: '{input}'")]
    #[diagnostic(
        code(cmdpack::input::invalid_repository),
        help("Valid formats: owner/repo, https://host/owner/repo.git, git@host:owner/repo.git, optionally suffixed with @version")
    )]
    InvalidRepository { input: String },

    #[error("Invalid command name '{name}': {reason}")]
    #[diagnostic(
        code(cmdpack::input::invalid_name),
        help("Command names may contain letters, digits, '-', '_' and '.', and must not start with '.' or '-'")
    )]
    InvalidCommandName { name: String, reason: String },

    // Not-found errors
    #[error("Command '{name}' is not installed")]
    #[diagnostic(
        code(cmdpack::command::not_found),
        help("Run 'cmdpack list' to see installed commands")
    )]
    CommandNotFound { name: String },

    #[error("Project not found at: {path}")]
    #[diagnostic(
        code(cmdpack::project::not_found),
        help("Run 'cmdpack init' to create cmdpack.yaml in this directory")
    )]
    ProjectNotFound { path: String },

    // Already-exists errors
    #[error("Command '{name}' already exists")]
    #[diagnostic(
        code(cmdpack::command::already_exists),
        help("Pass --force to reinstall it")
    )]
    CommandAlreadyExists { name: String },

    #[error("Command name '{name}' is already used by {existing}, cannot install {repository}")]
    #[diagnostic(
        code(cmdpack::command::name_conflict),
        help("Choose another name with --name, or pass --force to replace the existing command")
    )]
    NameConflict {
        name: String,
        existing: String,
        repository: String,
    },

    #[error("Repository {repository} is already installed as '{name}'")]
    #[diagnostic(
        code(cmdpack::command::already_installed),
        help("Pass --force to reinstall it under the new name, or run 'cmdpack update {name}'")
    )]
    AlreadyInstalled { repository: String, name: String },

    #[error("Project already initialized: {path}")]
    #[diagnostic(
        code(cmdpack::project::already_initialized),
        help("Pass --force to overwrite the existing cmdpack.yaml")
    )]
    ProjectAlreadyInitialized { path: String },

    // Remote errors
    #[error("Failed to clone repository {url}: {reason}")]
    #[diagnostic(
        code(cmdpack::git::clone_failed),
        help("Check that the URL and version are correct and that you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(cmdpack::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to checkout '{git_ref}': {reason}")]
    #[diagnostic(code(cmdpack::git::checkout_failed))]
    GitCheckoutFailed { git_ref: String, reason: String },

    #[error("Failed to open repository at '{path}': {reason}")]
    #[diagnostic(code(cmdpack::git::open_failed))]
    GitOpenFailed { path: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(cmdpack::git::operation_failed))]
    GitOperationFailed { message: String },

    // Structural errors
    #[error("Invalid command structure in {repository}: {reason}")]
    #[diagnostic(
        code(cmdpack::structure::invalid),
        help("A command repository needs a cmdpack.yaml with name, version, description, author, repository and entry, plus the entry document it names")
    )]
    InvalidStructure { repository: String, reason: String },

    #[error("Invalid command metadata in {path}: {reason}")]
    #[diagnostic(code(cmdpack::structure::invalid_metadata))]
    MetadataInvalid { path: String, reason: String },

    // Configuration errors
    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(code(cmdpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(cmdpack::config::invalid))]
    ConfigInvalid { message: String },

    // Local I/O errors
    #[error("Failed to read {path}: {reason}")]
    #[diagnostic(code(cmdpack::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    #[diagnostic(code(cmdpack::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove {path}: {reason}")]
    #[diagnostic(code(cmdpack::fs::remove_failed))]
    FileRemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(cmdpack::fs::io_error))]
    IoError { message: String },

    // Bulk operations
    #[error("{operation}: {failed} of {total} failed")]
    #[diagnostic(
        code(cmdpack::batch::failed),
        help("See the messages above for the individual failures")
    )]
    BatchFailed {
        operation: String,
        failed: usize,
        total: usize,
    },
}

impl CmdpackError {
    /// Short, single-line description used in bulk summaries
    pub fn summary(&self) -> String {
        match self.help() {
            Some(help) => format!("{self} ({help})"),
            None => self.to_string(),
        }
    }
}

impl From<std::io::Error> for CmdpackError {
    fn from(err: std::io::Error) -> Self {
        CmdpackError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CmdpackError {
    fn from(err: serde_yaml::Error) -> Self {
        CmdpackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CmdpackError {
    fn from(err: serde_json::Error) -> Self {
        CmdpackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for CmdpackError {
    fn from(err: git2::Error) -> Self {
        CmdpackError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

impl From<inquire::InquireError> for CmdpackError {
    fn from(err: inquire::InquireError) -> Self {
        CmdpackError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, CmdpackError>;
