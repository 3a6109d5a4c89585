//! Repository + version specification parsing
//!
//! Splitting `repository@version` is trickier than it looks because `@` is
//! also used for SSH user designation (`git@host:...`) and may appear inside
//! SSH paths (`git@host:user@company/repo.git`). The parser never fails:
//! input it cannot make sense of becomes a repository without a version.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed reference to a remote command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Repository as given (shorthand, HTTPS, SSH or local path)
    pub repository: String,

    /// Requested version (tag, branch or commit); `None` means latest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl CommandSpec {
    /// Create a spec from already separated parts
    pub fn new(repository: impl Into<String>, version: Option<String>) -> Self {
        Self {
            repository: repository.into(),
            version: version.filter(|v| !v.is_empty()),
        }
    }

    /// Parse a `repository[@version]` string
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (repository, version) = split_version(input);

        if repository.is_empty() {
            return Self::new(input, None);
        }

        Self::new(repository, version.map(str::to_string))
    }

    /// Replace the version, keeping the repository
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version.filter(|v| !v.is_empty());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.repository, version),
            None => f.write_str(&self.repository),
        }
    }
}

/// Check if input is an SCP-style SSH URL: `<token>@<host>:<path>`
///
/// The token must not contain `/` or `:`, and the host must be followed by a
/// `:` before any `/`.
pub fn is_ssh_style(input: &str) -> bool {
    if input.starts_with("git@") {
        return true;
    }
    if input.contains("://") {
        return false;
    }

    let Some(at_pos) = input.find('@') else {
        return false;
    };
    let token = &input[..at_pos];
    if token.is_empty() || token.contains('/') || token.contains(':') {
        return false;
    }

    let host_and_path = &input[at_pos + 1..];
    match (host_and_path.find(':'), host_and_path.find('/')) {
        (Some(colon), Some(slash)) => colon > 0 && colon < slash,
        (Some(colon), None) => colon > 0,
        _ => false,
    }
}

/// Split a spec into `(repository, version)`
fn split_version(input: &str) -> (&str, Option<&str>) {
    if !input.contains('@') {
        return (input, None);
    }

    if is_ssh_style(input) {
        return split_ssh(input);
    }

    split_generic(input)
}

fn split_ssh(input: &str) -> (&str, Option<&str>) {
    if let Some(pos) = input.find(".git@") {
        let repo_end = pos + ".git".len();
        return (&input[..repo_end], non_empty(&input[repo_end + 1..]));
    }

    let Some(colon) = input.find(':') else {
        return (input, None);
    };
    let path_start = colon + 1;
    let path = &input[path_start..];

    let Some(first_at) = path.find('@') else {
        return (input, None);
    };

    // `git@host:user@company/repo@branch`: the first `@` belongs to an
    // embedded user token when nothing before it contains a `/`.
    let version_at = if path[..first_at].contains('/') {
        Some(first_at)
    } else {
        path[first_at + 1..]
            .find('@')
            .map(|next| first_at + 1 + next)
    };

    match version_at {
        Some(at) => {
            let split = path_start + at;
            (&input[..split], non_empty(&input[split + 1..]))
        }
        None => (input, None),
    }
}

fn split_generic(input: &str) -> (&str, Option<&str>) {
    // Ignore userinfo in `scheme://user@host/...`
    let search_start = match input.find("://") {
        Some(scheme_end) => {
            let authority_start = scheme_end + "://".len();
            match input[authority_start..].find('/') {
                Some(slash) => authority_start + slash,
                None => return (input, None),
            }
        }
        None => 0,
    };

    match input[search_start..].rfind('@') {
        Some(at) => {
            let split = search_start + at;
            (&input[..split], non_empty(&input[split + 1..]))
        }
        None => (input, None),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(input: &str) -> (String, Option<String>) {
        let spec = CommandSpec::parse(input);
        (spec.repository, spec.version)
    }

    #[test]
    fn test_shorthand_without_version() {
        assert_eq!(parts("owner/repo"), ("owner/repo".to_string(), None));
    }

    #[test]
    fn test_shorthand_with_version() {
        assert_eq!(
            parts("owner/repo@v1.0.0"),
            ("owner/repo".to_string(), Some("v1.0.0".to_string()))
        );
    }

    #[test]
    fn test_https_with_version() {
        assert_eq!(
            parts("https://github.com/owner/repo.git@main"),
            (
                "https://github.com/owner/repo.git".to_string(),
                Some("main".to_string())
            )
        );
    }

    #[test]
    fn test_https_userinfo_is_not_a_version() {
        assert_eq!(
            parts("https://token@github.com/owner/repo.git"),
            ("https://token@github.com/owner/repo.git".to_string(), None)
        );
        assert_eq!(
            parts("ssh://git@example.com/owner/repo.git@v2"),
            (
                "ssh://git@example.com/owner/repo.git".to_string(),
                Some("v2".to_string())
            )
        );
    }

    #[test]
    fn test_ssh_without_version() {
        assert_eq!(
            parts("git@github.com:owner/repo.git"),
            ("git@github.com:owner/repo.git".to_string(), None)
        );
    }

    #[test]
    fn test_ssh_with_git_suffix_and_version() {
        assert_eq!(
            parts("git@github.com:owner/repo.git@v1.2.3"),
            (
                "git@github.com:owner/repo.git".to_string(),
                Some("v1.2.3".to_string())
            )
        );
    }

    #[test]
    fn test_ssh_with_embedded_user_in_path() {
        assert_eq!(
            parts("git@host:user@company/repo.git@branch"),
            (
                "git@host:user@company/repo.git".to_string(),
                Some("branch".to_string())
            )
        );
        assert_eq!(
            parts("git@host:user@company/repo@branch"),
            (
                "git@host:user@company/repo".to_string(),
                Some("branch".to_string())
            )
        );
    }

    #[test]
    fn test_ssh_embedded_user_without_version() {
        assert_eq!(
            parts("git@host:user@company/repo"),
            ("git@host:user@company/repo".to_string(), None)
        );
    }

    #[test]
    fn test_ssh_without_git_suffix_and_slashed_branch() {
        assert_eq!(
            parts("git@github.com:owner/repo@feature/new-thing"),
            (
                "git@github.com:owner/repo".to_string(),
                Some("feature/new-thing".to_string())
            )
        );
    }

    #[test]
    fn test_custom_ssh_user() {
        assert!(is_ssh_style("deploy@git.example.com:team/repo.git"));
        assert_eq!(
            parts("deploy@git.example.com:team/repo.git@v3"),
            (
                "deploy@git.example.com:team/repo.git".to_string(),
                Some("v3".to_string())
            )
        );
    }

    #[test]
    fn test_is_ssh_style_rejects_urls_and_shorthand() {
        assert!(!is_ssh_style("owner/repo@v1"));
        assert!(!is_ssh_style("https://github.com/owner/repo"));
        assert!(!is_ssh_style("ssh://git@host/owner/repo"));
    }

    #[test]
    fn test_malformed_input_degrades_to_repository() {
        assert_eq!(parts("@v1"), ("@v1".to_string(), None));
        assert_eq!(parts("owner/repo@"), ("owner/repo".to_string(), None));
    }

    #[test]
    fn test_display_round_trips_parts() {
        let spec = CommandSpec::parse("owner/repo@v1.0.0");
        assert_eq!(spec.to_string(), "owner/repo@v1.0.0");
        assert_eq!(CommandSpec::parse("owner/repo").to_string(), "owner/repo");
    }

    #[test]
    fn test_with_version_drops_empty() {
        let spec = CommandSpec::parse("owner/repo@v1").with_version(Some(String::new()));
        assert_eq!(spec.version, None);
    }
}
