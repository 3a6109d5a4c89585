//! Git operations for fetching commands
//!
//! The engine never talks to git directly. It goes through the [`GitClient`]
//! trait, which is handed to the installer and the updater as an explicit
//! collaborator. [`Git2Client`] is the production implementation built on
//! libgit2; tests substitute a fake.
//!
//! Authentication is delegated entirely to git's native system:
//! - SSH agent and keys from ~/.ssh/
//! - Git credential helpers

mod auth;
mod clone;
mod refs;

use std::path::Path;

use crate::error::Result;

/// Git operations the engine depends on
pub trait GitClient {
    /// Clone `url` into `target`, checking out `git_ref` when given
    fn clone_repo(&self, url: &str, target: &Path, git_ref: Option<&str>) -> Result<()>;

    /// Check out `git_ref` (branch, tag or commit) in an existing clone
    fn checkout(&self, repo_path: &Path, git_ref: &str) -> Result<()>;

    /// Most recent tag reachable from HEAD
    fn latest_tag(&self, repo_path: &Path) -> Result<String>;

    /// Full hash of the commit HEAD points at
    fn current_commit(&self, repo_path: &Path) -> Result<String>;

    /// Full hash of the commit `git_ref` points at in a local clone
    fn ref_commit(&self, repo_path: &Path, git_ref: &str) -> Result<String>;

    /// Full hash of the commit `git_ref` points at on the remote
    fn remote_ref_commit(&self, url: &str, git_ref: &str) -> Result<String>;
}

/// [`GitClient`] backed by libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Client;

impl Git2Client {
    pub fn new() -> Self {
        Self
    }
}

impl GitClient for Git2Client {
    fn clone_repo(&self, url: &str, target: &Path, git_ref: Option<&str>) -> Result<()> {
        clone::clone(url, target, git_ref)
    }

    fn checkout(&self, repo_path: &Path, git_ref: &str) -> Result<()> {
        let repo = refs::open(repo_path)?;
        refs::checkout(&repo, git_ref)
    }

    fn latest_tag(&self, repo_path: &Path) -> Result<String> {
        let repo = refs::open(repo_path)?;
        refs::latest_tag(&repo)
    }

    fn current_commit(&self, repo_path: &Path) -> Result<String> {
        let repo = refs::open(repo_path)?;
        refs::resolve_ref(&repo, None)
    }

    fn ref_commit(&self, repo_path: &Path, git_ref: &str) -> Result<String> {
        let repo = refs::open(repo_path)?;
        refs::resolve_ref(&repo, Some(git_ref))
    }

    fn remote_ref_commit(&self, url: &str, git_ref: &str) -> Result<String> {
        refs::remote_ref_commit(url, git_ref)
    }
}
