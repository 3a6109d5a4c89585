//! Filesystem steps of an install
//!
//! - structure check of a fresh clone
//! - copying the command into place
//! - writing the standalone document
//! - deleting an installed command
//! - checking an installed command for damage

use std::fs;
use std::path::Path;

use crate::common::fs::{CopyOptions, copy_dir_recursive, remove_dir_if_exists, remove_file_if_exists};
use crate::config::CommandMetadata;
use crate::config::metadata::METADATA_FILE;
use crate::error::{CmdpackError, Result};
use crate::project::Project;

/// Require well-formed metadata and an existing entry document in a clone
pub fn check_structure(checkout: &Path, repository: &str) -> Result<CommandMetadata> {
    let invalid = |reason: String| CmdpackError::InvalidStructure {
        repository: repository.to_string(),
        reason,
    };

    let metadata_path = CommandMetadata::path_in(checkout);
    let content = fs::read_to_string(&metadata_path)
        .map_err(|_| invalid(format!("{METADATA_FILE} not found")))?;
    let metadata = CommandMetadata::from_yaml(&content)
        .map_err(|e| invalid(format!("invalid {METADATA_FILE}: {e}")))?;

    if !metadata.entry_path(checkout).is_file() {
        return Err(invalid(format!(
            "entry document '{}' not found",
            metadata.entry
        )));
    }

    Ok(metadata)
}

/// Copy a clone into `target`, leaving out git internals
pub fn copy_command(checkout: &Path, target: &Path) -> Result<()> {
    copy_dir_recursive(checkout, target, &CopyOptions::exclude_git())
}

/// Write the standalone document from the entry document
pub fn write_standalone_doc(entry: &Path, doc: &Path) -> Result<()> {
    let content = fs::read_to_string(entry).map_err(|e| CmdpackError::FileReadFailed {
        path: entry.display().to_string(),
        reason: e.to_string(),
    })?;
    fs::write(doc, content).map_err(|e| CmdpackError::FileWriteFailed {
        path: doc.display().to_string(),
        reason: e.to_string(),
    })
}

/// Delete the directory and standalone document of command `name`
///
/// Returns whether anything existed.
pub fn remove_installed(project: &Project, name: &str) -> Result<bool> {
    let removed_dir = remove_dir_if_exists(&project.command_dir(name))?;
    let removed_doc = remove_file_if_exists(&project.standalone_doc(name))?;
    Ok(removed_dir || removed_doc)
}

/// Reason command `name` is broken on disk, or `None` when it is intact
pub fn check_installed(project: &Project, name: &str) -> Option<String> {
    let dir = project.command_dir(name);
    if !dir.is_dir() {
        return Some("command directory not found".to_string());
    }
    if !project.standalone_doc(name).is_file() {
        return Some("standalone .md file not found".to_string());
    }
    match CommandMetadata::load(&dir) {
        Ok(_) => None,
        Err(CmdpackError::MetadataInvalid { reason, .. }) => {
            Some(format!("invalid metadata: {reason}"))
        }
        Err(e) => Some(format!("invalid metadata: {e}")),
    }
}
