//! Repository cloning
//!
//! A requested ref decides the clone strategy:
//! - commit hash: full clone, then detached checkout of the commit
//! - branch or tag: shallow clone of that branch when the remote allows it,
//!   otherwise a full clone followed by a checkout
//! - no ref: full clone, so tags are available for version resolution

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use git2::{ErrorClass, FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};

use super::auth::setup_auth_callbacks;
use super::refs;
use crate::error::{CmdpackError, Result};
use crate::resolver::version::is_commit_hash;

/// Whether `url` names a repository on the local filesystem
fn is_local_url(url: &str) -> bool {
    url.starts_with("file://") || url.starts_with('/') || Path::new(url).is_absolute()
}

pub(super) fn clone(url: &str, target: &Path, git_ref: Option<&str>) -> Result<()> {
    let Some(git_ref) = git_ref else {
        clone_into(url, target, false, None)?;
        return Ok(());
    };

    if !is_commit_hash(git_ref) && !is_local_url(url) {
        match clone_into(url, target, true, Some(git_ref)) {
            Ok(_) => return Ok(()),
            Err(e) => {
                log::debug!("Shallow clone of {url}@{git_ref} failed, retrying full clone: {e}");
                if target.exists() {
                    fs::remove_dir_all(target)?;
                }
            }
        }
    }

    let repo = clone_into(url, target, false, None)?;
    refs::checkout(&repo, git_ref)
}

fn clone_into(
    url: &str,
    target: &Path,
    shallow: bool,
    branch: Option<&str>,
) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    if shallow {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = branch {
        builder.branch(branch);
    }

    let normalized = normalize_url(url);
    log::debug!("Cloning {normalized} into {}", target.display());
    builder
        .clone(normalized.as_ref(), target)
        .map_err(|e| CmdpackError::GitCloneFailed {
            url: url.to_string(),
            reason: interpret_git_error(&e),
        })
}

/// Rewrite URLs into forms libgit2 accepts
///
/// SCP-style `git@host:owner/repo` becomes `ssh://git@host/owner/repo` and
/// relative `file://` paths gain the missing slash.
pub(super) fn normalize_url(url: &str) -> Cow<'_, str> {
    if let Some(rest) = url.strip_prefix("file://") {
        if !rest.is_empty() && !rest.starts_with('/') {
            return Cow::Owned(format!("file:///{}", rest.replace('\\', "/")));
        }
        return Cow::Borrowed(url);
    }

    if url.contains("://") || !crate::source::spec::is_ssh_style(url) {
        return Cow::Borrowed(url);
    }

    match url.split_once(':') {
        Some((host, path)) => Cow::Owned(format!("ssh://{host}/{}", path.trim_start_matches('/'))),
        None => Cow::Borrowed(url),
    }
}

/// Turn a libgit2 error into a short, readable reason
pub(super) fn interpret_git_error(err: &git2::Error) -> String {
    let message = err.message().to_lowercase();
    let class = err.class();

    let has = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if has(&["not found", "404", "too many redirects", "authentication replays"]) {
        "Repository not found".to_string()
    } else if has(&["authentication", "credentials"]) {
        "Authentication failed".to_string()
    } else if has(&["permission denied", "access denied"]) {
        "Permission denied".to_string()
    } else if has(&["connection", "network", "timeout", "timed out"]) {
        "Network error".to_string()
    } else if class == ErrorClass::Http && message.contains("certificate") {
        "Certificate error".to_string()
    } else if class == ErrorClass::Http && message.contains("ssl") {
        "SSL error".to_string()
    } else {
        match class {
            ErrorClass::Http => format!("HTTP error: {}", err.message()),
            ErrorClass::Ssh => format!("SSH error: {}", err.message()),
            _ => err.message().to_string(),
        }
    }
}
