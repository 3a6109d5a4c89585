//! Git reference resolution and checkout
//!
//! This module handles:
//! - Resolving branches, tags and (short) commit hashes to full SHAs
//! - Detached checkout of a resolved ref
//! - Finding the latest tag reachable from HEAD
//! - Looking up a ref on a remote without cloning

use std::path::Path;

use git2::{Direction, Oid, RemoteCallbacks, Repository};

use super::auth::setup_auth_callbacks;
use super::clone::{interpret_git_error, normalize_url};
use crate::error::{CmdpackError, Result};

/// Open an existing clone
pub(super) fn open(path: &Path) -> Result<Repository> {
    Repository::open(path).map_err(|e| CmdpackError::GitOpenFailed {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })
}

/// Resolve a ref (or HEAD when `None`) to a full commit SHA
pub(super) fn resolve_ref(repo: &Repository, git_ref: Option<&str>) -> Result<String> {
    let oid = match git_ref {
        Some(r) => resolve_reference(repo, r)?,
        None => {
            let head = repo.head().map_err(|e| CmdpackError::GitRefResolveFailed {
                git_ref: "HEAD".to_string(),
                reason: e.message().to_string(),
            })?;
            head.peel_to_commit()
                .map_err(|e| CmdpackError::GitRefResolveFailed {
                    git_ref: "HEAD".to_string(),
                    reason: e.message().to_string(),
                })?
                .id()
        }
    };
    Ok(oid.to_string())
}

/// Resolve a branch, tag or commit prefix to the commit it points at
fn resolve_reference(repo: &Repository, git_ref: &str) -> Result<Oid> {
    let candidates = [
        git_ref.to_string(),
        format!("refs/tags/{git_ref}"),
        format!("refs/remotes/origin/{git_ref}"),
        format!("refs/heads/{git_ref}"),
    ];

    for name in &candidates {
        if let Ok(reference) = repo.find_reference(name) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit.id());
            }
        }
    }

    repo.revparse_single(git_ref)
        .and_then(|object| object.peel_to_commit())
        .map(|commit| commit.id())
        .map_err(|e| CmdpackError::GitRefResolveFailed {
            git_ref: git_ref.to_string(),
            reason: e.message().to_string(),
        })
}

/// Detach HEAD at `git_ref` and force the working tree to match
pub(super) fn checkout(repo: &Repository, git_ref: &str) -> Result<()> {
    let failed = |e: git2::Error| CmdpackError::GitCheckoutFailed {
        git_ref: git_ref.to_string(),
        reason: e.message().to_string(),
    };

    let oid = resolve_reference(repo, git_ref)?;
    repo.set_head_detached(oid).map_err(failed)?;

    let mut builder = git2::build::CheckoutBuilder::new();
    builder.force();
    repo.checkout_head(Some(&mut builder)).map_err(failed)?;

    log::debug!("Checked out {git_ref} at {oid}");
    Ok(())
}

/// Name of the most recent tag reachable from HEAD
pub(super) fn latest_tag(repo: &Repository) -> Result<String> {
    let failed = |e: git2::Error| CmdpackError::GitRefResolveFailed {
        git_ref: "latest tag".to_string(),
        reason: e.message().to_string(),
    };

    let mut options = git2::DescribeOptions::new();
    options.describe_tags();
    let describe = repo.describe(&options).map_err(failed)?;

    let mut format = git2::DescribeFormatOptions::new();
    format.abbreviated_size(0);
    describe.format(Some(&format)).map_err(failed)
}

/// Commit that `git_ref` points at on the remote, without cloning
///
/// Annotated tags are peeled to their commit so the result compares equal
/// to the commit recorded after a checkout of the same tag.
pub(super) fn remote_ref_commit(url: &str, git_ref: &str) -> Result<String> {
    let failed = |reason: String| CmdpackError::GitRefResolveFailed {
        git_ref: git_ref.to_string(),
        reason,
    };

    let normalized = normalize_url(url);
    let mut remote =
        git2::Remote::create_detached(normalized.as_ref()).map_err(|e| failed(interpret_git_error(&e)))?;

    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);
    let connection = remote
        .connect_auth(Direction::Fetch, Some(callbacks), None)
        .map_err(|e| failed(interpret_git_error(&e)))?;

    let heads = connection
        .list()
        .map_err(|e| failed(interpret_git_error(&e)))?;

    let candidates = [
        format!("refs/tags/{git_ref}^{{}}"),
        format!("refs/tags/{git_ref}"),
        format!("refs/heads/{git_ref}"),
        git_ref.to_string(),
    ];

    candidates
        .iter()
        .find_map(|candidate| {
            heads
                .iter()
                .find(|head| head.name() == candidate)
                .map(|head| head.oid().to_string())
        })
        .ok_or_else(|| failed(format!("ref not found on {url}")))
}
