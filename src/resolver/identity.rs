//! Identity resolution across renames
//!
//! A command is identified by the repository it came from, not by its name.
//! Looking up an installed repository scans the metadata of every installed
//! command and compares normalized `owner/repo` paths.

use std::fs;
use std::path::Path;

use crate::config::CommandMetadata;
use crate::source::repository;

/// Name of the installed command whose metadata records `repo`, if any
///
/// Commands with unreadable metadata are skipped. Directories are visited in
/// name order so the answer is stable when several match.
pub fn find_existing_by_repository(commands_dir: &Path, repo: &str) -> Option<String> {
    let target = repository::repository_path(repo)?;

    let mut names: Vec<String> = fs::read_dir(commands_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();

    names.into_iter().find(|name| {
        CommandMetadata::load(&commands_dir.join(name))
            .ok()
            .and_then(|metadata| repository::repository_path(&metadata.repository))
            .is_some_and(|path| path == target)
    })
}
