//! Repository normalization
//!
//! Every repository string maps to a canonical `owner/repo` path which is
//! what identity checks compare on. Clone URLs and default command names are
//! derived from the same parsing.

use crate::error::{CmdpackError, Result};
use crate::source::spec::is_ssh_style;

const GITHUB_HOST: &str = "github.com";

/// Check if string looks like a GitHub `owner/repo` shorthand
pub fn is_github_shorthand(input: &str) -> bool {
    !input.contains("://")
        && !input.starts_with("git@")
        && !input.starts_with("github:")
        && !input.starts_with('/')
        && !input.starts_with('.')
        && !input.starts_with('~')
        && !input.contains('\\')
        && !is_ssh_style(input)
        && input.matches('/').count() == 1
        && input.split('/').all(|part| !part.is_empty())
}

/// Split a repository string into `(host, path)`
///
/// Shorthand and local paths have no host.
fn split_host(repository: &str) -> (Option<&str>, &str) {
    if let Some(rest) = repository.strip_prefix("github:") {
        return (Some(GITHUB_HOST), rest);
    }

    if let Some(scheme_end) = repository.find("://") {
        let rest = &repository[scheme_end + "://".len()..];
        let (authority, path) = match rest.find('/') {
            Some(slash) => (&rest[..slash], &rest[slash + 1..]),
            None => (rest, ""),
        };
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);
        return (Some(host).filter(|h| !h.is_empty()), path);
    }

    if is_ssh_style(repository) {
        if let Some(colon) = repository.find(':') {
            let authority = &repository[..colon];
            let host = authority.rsplit('@').next().unwrap_or(authority);
            return (Some(host), &repository[colon + 1..]);
        }
    }

    if is_github_shorthand(repository) {
        return (Some(GITHUB_HOST), repository);
    }

    (None, repository)
}

/// Path segments of a repository with trailing `.git` and slashes removed
fn path_segments(repository: &str) -> Vec<&str> {
    let (_, path) = split_host(repository.trim());
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    path.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}

/// Canonical `owner/repo` path of a repository
///
/// Returns `None` when the repository does not name at least an owner and a
/// repository.
pub fn repository_path(repository: &str) -> Option<String> {
    let segments = path_segments(repository);
    if segments.len() < 2 {
        return None;
    }
    let owner = segments[segments.len() - 2];
    let repo = segments[segments.len() - 1];
    Some(format!("{owner}/{repo}"))
}

/// Whether two repository strings refer to the same `owner/repo`
pub fn same_repository(a: &str, b: &str) -> bool {
    match (repository_path(a), repository_path(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether the repository is hosted on github.com
pub fn is_github_hosted(repository: &str) -> bool {
    matches!(split_host(repository.trim()), (Some(host), _) if host.eq_ignore_ascii_case(GITHUB_HOST))
}

/// URL to clone a repository from
///
/// GitHub shorthand expands to an HTTPS URL; everything else is used as-is.
pub fn clone_url(repository: &str) -> String {
    let repository = repository.trim();
    if let Some(rest) = repository.strip_prefix("github:") {
        return format!("https://{GITHUB_HOST}/{rest}.git");
    }
    if is_github_shorthand(repository) {
        return format!("https://{GITHUB_HOST}/{repository}.git");
    }
    repository.to_string()
}

/// Repository string recorded in the desired-state file
///
/// GitHub repositories are stored as `owner/repo`; others keep their full
/// form so they can be cloned again.
pub fn desired_repository(repository: &str) -> String {
    if is_github_hosted(repository) {
        if let Some(path) = repository_path(repository) {
            return path;
        }
    }
    repository.trim().to_string()
}

/// Default command name for a repository: its last path segment
pub fn derive_command_name(repository: &str) -> Result<String> {
    let name = path_segments(repository)
        .last()
        .map(|s| s.to_string())
        .ok_or_else(|| CmdpackError::InvalidRepository {
            input: repository.to_string(),
        })?;
    validate_command_name(&name)?;
    Ok(name)
}

/// Validate a command name
///
/// Names become directory and file names, so they must be a single safe
/// path component.
pub fn validate_command_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(CmdpackError::InvalidCommandName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.starts_with('.') || name.starts_with('-') {
        return invalid("name cannot start with '.' or '-'");
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return invalid(&format!("character '{c}' is not allowed"));
    }
    Ok(())
}

/// Validate that a repository string names something cloneable
pub fn validate_repository(repository: &str) -> Result<()> {
    let repository = repository.trim();
    if repository.is_empty() || repository_path(repository).is_none() {
        return Err(CmdpackError::InvalidRepository {
            input: repository.to_string(),
        });
    }
    Ok(())
}
