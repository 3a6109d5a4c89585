//! `LockEntry` struct for the lockfile

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::version::is_commit_hash;

/// Placeholder recorded when the commit of a checkout cannot be determined
pub const UNKNOWN_COMMIT: &str = "unknown";

/// One installed command in the lockfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    /// On-disk directory name
    pub name: String,

    /// Version declared by the command's own metadata
    pub version: String,

    /// Repository as originally given
    pub source: String,

    /// `source@effective-version`: the ref that was checked out
    pub resolved: String,

    /// Full commit hash, or [`UNKNOWN_COMMIT`]
    pub commit: String,

    pub installed_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl LockEntry {
    /// The ref part of `resolved`
    pub fn resolved_version(&self) -> Option<&str> {
        self.resolved
            .strip_prefix(self.source.as_str())
            .and_then(|rest| rest.strip_prefix('@'))
            .filter(|v| !v.is_empty())
    }

    /// Whether the checked-out ref is an immutable commit hash
    pub fn is_pinned(&self) -> bool {
        self.resolved_version().is_some_and(is_commit_hash)
    }

    /// Whether a real commit hash was recorded
    pub fn has_commit(&self) -> bool {
        self.commit != UNKNOWN_COMMIT && !self.commit.is_empty()
    }
}

/// The outcome of an install, as handed to [`super::Lockfile::record_install`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    pub name: String,
    pub version: String,
    pub source: String,
    pub effective_version: String,
    pub commit: Option<String>,
}

impl InstallRecord {
    pub(crate) fn into_entry(self, installed_at: DateTime<Utc>, now: DateTime<Utc>) -> LockEntry {
        LockEntry {
            resolved: format!("{}@{}", self.source, self.effective_version),
            name: self.name,
            version: self.version,
            source: self.source,
            commit: self
                .commit
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_COMMIT.to_string()),
            installed_at: installed_at.trunc_subsecs(0),
            updated_at: now.trunc_subsecs(0),
        }
    }
}
