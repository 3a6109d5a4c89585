//! Lockfile (cmdpack.lock) main module
//!
//! The lockfile is the authoritative record of what is installed: for every
//! command name it stores the source repository, the ref that was actually
//! checked out, the commit and the install/update timestamps.
//!
//! ```yaml
//! version: "1.0"
//! lockfileVersion: 1
//! commands:
//!   review:
//!     name: review
//!     version: 1.2.0
//!     source: owner/review
//!     resolved: owner/review@v1.2.0
//!     commit: 3f2c1e0d9b8a7f6e5d4c3b2a1f0e9d8c7b6a5f4e
//!     installed_at: 2026-01-01T10:00:00Z
//!     updated_at: 2026-02-01T10:00:00Z
//! ```

pub mod entry;


use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::utils::{null_as_default, parse_error, read_optional, write_atomic};
use crate::error::Result;
use crate::source::repository;

pub use entry::{InstallRecord, LockEntry};

/// Format version written to the `version` field
pub const LOCKFILE_VERSION: &str = "1.0";

/// Schema version written to the `lockfileVersion` field
pub const LOCKFILE_SCHEMA: u32 = 1;

/// Lockfile structure (cmdpack.lock)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lockfile {
    pub version: String,

    #[serde(rename = "lockfileVersion")]
    pub lockfile_version: u32,

    /// Installed commands keyed by on-disk name
    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: BTreeMap<String, LockEntry>,
}

impl Default for Lockfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Lockfile {
    /// Create a new, empty lockfile
    pub fn new() -> Self {
        Self {
            version: LOCKFILE_VERSION.to_string(),
            lockfile_version: LOCKFILE_SCHEMA,
            commands: BTreeMap::new(),
        }
    }

    /// Load the lockfile at `path`; a missing file is an empty lockfile
    pub fn load(path: &Path) -> Result<Self> {
        match read_optional(path)? {
            Some(content) if !content.trim().is_empty() => {
                let lockfile = Self::from_yaml(&content).map_err(|e| parse_error(path, &e))?;
                log::debug!("Loaded {} lock entries from {}", lockfile.len(), path.display());
                Ok(lockfile)
            }
            _ => Ok(Self::new()),
        }
    }

    /// Write the lockfile to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.to_yaml()?)
    }

    /// Parse lockfile from a YAML string
    pub fn from_yaml(yaml: &str) -> serde_yaml::Result<Self> {
        let mut lockfile: Self = serde_yaml::from_str(yaml)?;
        lockfile.normalize_names();
        Ok(lockfile)
    }

    /// Serialize lockfile to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The map key is the authoritative name
    fn normalize_names(&mut self) {
        for (key, entry) in &mut self.commands {
            if entry.name != *key {
                entry.name.clone_from(key);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&LockEntry> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Entries in name order
    pub fn entries(&self) -> impl Iterator<Item = &LockEntry> {
        self.commands.values()
    }

    /// Find the entry whose source is the same `owner/repo` as `repository`
    pub fn find_by_repository(&self, repository: &str) -> Option<&LockEntry> {
        self.commands
            .values()
            .find(|entry| repository::same_repository(&entry.source, repository))
    }

    /// Record a successful install or update
    ///
    /// An existing entry for the same repository is deleted first, even when
    /// the name changed, and its `installed_at` carries over to the new entry.
    /// `updated_at` is always `now`.
    pub fn record_install(&mut self, record: InstallRecord, now: DateTime<Utc>) -> &LockEntry {
        let previous_key = self
            .find_by_repository(&record.source)
            .map(|entry| entry.name.clone());

        let previous = previous_key.and_then(|key| self.commands.remove(&key));
        if let Some(old) = &previous {
            if old.name != record.name {
                log::debug!(
                    "lock entry for {} renamed from '{}' to '{}'",
                    record.source,
                    old.name,
                    record.name
                );
            }
        }

        let installed_at = previous.map_or(now, |old| old.installed_at);
        let entry = record.into_entry(installed_at, now);
        let key = entry.name.clone();
        self.commands.insert(key.clone(), entry);
        &self.commands[&key]
    }

    /// Remove the entry for `name`
    pub fn remove(&mut self, name: &str) -> Option<LockEntry> {
        self.commands.remove(name)
    }
}
