//! Version resolution
//!
//! Decides which concrete ref an install materializes. Precedence, highest
//! first:
//! 1. the version the caller asked for
//! 2. the latest tag in the clone
//! 3. the current commit, shortened to 7 characters

use std::path::Path;

use crate::config::lockfile::entry::UNKNOWN_COMMIT;
use crate::error::Result;
use crate::git::GitClient;

const SHORT_HASH_LEN: usize = 7;

/// Whether `version` is an (abbreviated) commit hash
///
/// Only 7 to 40 lowercase hex digits qualify. Such versions are immutable
/// pins and are never checked for updates.
pub fn is_commit_hash(version: &str) -> bool {
    (SHORT_HASH_LEN..=40).contains(&version.len())
        && version.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Outcome of resolving the version of a fresh clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// Ref that is checked out in the clone
    pub effective: String,

    /// Full commit hash of the checkout, if git could report it
    pub commit: Option<String>,
}

/// Resolves versions against a clone through a [`GitClient`]
pub struct VersionResolver<'a> {
    git: &'a dyn GitClient,
}

impl<'a> VersionResolver<'a> {
    pub fn new(git: &'a dyn GitClient) -> Self {
        Self { git }
    }

    /// Resolve the effective version of the clone at `repo_path`
    ///
    /// When no version was requested and the repository has tags, the latest
    /// tag is checked out so the installed files match the recorded version.
    pub fn resolve(&self, explicit: Option<&str>, repo_path: &Path) -> Result<ResolvedVersion> {
        let effective = match explicit.filter(|v| !v.is_empty()) {
            Some(version) => version.to_string(),
            None => match self.git.latest_tag(repo_path) {
                Ok(tag) => {
                    log::debug!("No version requested, using latest tag {tag}");
                    self.git.checkout(repo_path, &tag)?;
                    tag
                }
                Err(e) => {
                    log::debug!("No tags found ({e}), falling back to current commit");
                    match self.git.current_commit(repo_path) {
                        Ok(commit) => commit.chars().take(SHORT_HASH_LEN).collect(),
                        Err(_) => UNKNOWN_COMMIT.to_string(),
                    }
                }
            },
        };

        let commit = match explicit {
            Some(version) if !version.is_empty() => self
                .git
                .ref_commit(repo_path, version)
                .or_else(|_| self.git.current_commit(repo_path)),
            _ => self.git.current_commit(repo_path),
        };
        let commit = match commit {
            Ok(commit) => Some(commit),
            Err(e) => {
                log::warn!("Could not read commit of {}: {e}", repo_path.display());
                None
            }
        };

        Ok(ResolvedVersion { effective, commit })
    }
}
