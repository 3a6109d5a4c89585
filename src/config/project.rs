//! Project configuration (cmdpack.yaml)
//!
//! The user-editable desired state: which repositories this project wants
//! installed, each written as `owner/repo[@version]`.
//!
//! ```yaml
//! name: my-project
//! commands:
//!   - owner/review@v1.0.0
//!   - owner/lint
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::utils::{null_as_default, parse_error, read_optional, write_atomic};
use crate::error::Result;
use crate::source::CommandSpec;
use crate::source::repository;

/// Project configuration from cmdpack.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Desired commands in declaration order
    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: Vec<String>,
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the configuration at `path`; a missing file is an empty config
    pub fn load(path: &Path) -> Result<Self> {
        match read_optional(path)? {
            Some(content) if !content.trim().is_empty() => {
                Self::from_yaml(&content).map_err(|e| parse_error(path, &e))
            }
            _ => Ok(Self::new()),
        }
    }

    /// Write the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.to_yaml()?)
    }

    pub fn from_yaml(yaml: &str) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parsed desired entries, skipping blank lines
    pub fn entries(&self) -> Vec<CommandSpec> {
        self.commands
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(CommandSpec::parse)
            .collect()
    }

    fn position_of(&self, repo: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|entry| repository::same_repository(&CommandSpec::parse(entry).repository, repo))
    }

    /// Find the desired entry for a repository
    pub fn find_by_repository(&self, repo: &str) -> Option<CommandSpec> {
        self.position_of(repo)
            .map(|pos| CommandSpec::parse(&self.commands[pos]))
    }

    /// Add or replace the entry for `spec.repository`
    ///
    /// An existing entry for the same `owner/repo` is replaced in place, so
    /// declaration order is kept. Returns whether the file content changed.
    pub fn add(&mut self, spec: &CommandSpec) -> bool {
        let line = CommandSpec::new(
            repository::desired_repository(&spec.repository),
            spec.version.clone(),
        )
        .to_string();

        match self.position_of(&spec.repository) {
            Some(pos) if self.commands[pos] == line => false,
            Some(pos) => {
                self.commands[pos] = line;
                true
            }
            None => {
                self.commands.push(line);
                true
            }
        }
    }

    /// Remove the entry for a repository; returns whether one was removed
    pub fn remove_repository(&mut self, repo: &str) -> bool {
        match self.position_of(repo) {
            Some(pos) => {
                self.commands.remove(pos);
                true
            }
            None => false,
        }
    }
}
