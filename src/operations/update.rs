//! Update operation
//!
//! Every update goes through one decision, [`UpdateOperation::should_update`],
//! applied in this order:
//! 1. `force` always updates
//! 2. no tracked version means the command follows latest and always updates
//! 3. a tracked commit hash is pinned and never checked
//! 4. otherwise the locked commit is compared with the remote commit of the
//!    tracked ref; a failed lookup counts as "needs update"
//!
//! The tracked version is the version of the command's desired-state entry.

use std::fmt;

use crate::config::{LockEntry, Lockfile};
use crate::error::{CmdpackError, Result};
use crate::git::GitClient;
use crate::installer::{InstallOptions, InstallOutcome, Installer};
use crate::operations::ItemFailure;
use crate::project::Project;
use crate::resolver::is_commit_hash;
use crate::source::{CommandSpec, repository};

/// Why a command does or does not need an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateReason {
    Forced,
    TracksLatest,
    Pinned { commit: String },
    UpToDate,
    RemoteChanged { local: String, remote: String },
    RemoteUnknown { error: String },
}

impl fmt::Display for UpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forced => f.write_str("forced"),
            Self::TracksLatest => f.write_str("tracks latest"),
            Self::Pinned { commit } => write!(f, "pinned to {commit}, not checked"),
            Self::UpToDate => f.write_str("up to date"),
            Self::RemoteChanged { local, remote } => {
                write!(f, "{} -> {}", short(local), short(remote))
            }
            Self::RemoteUnknown { error } => write!(f, "remote lookup failed ({error})"),
        }
    }
}

fn short(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}

/// Outcome of [`UpdateOperation::should_update`] for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDecision {
    pub name: String,
    pub repository: String,

    /// Version from the desired-state entry, if any
    pub tracked_version: Option<String>,

    pub needs_update: bool,
    pub reason: UpdateReason,
}

impl UpdateDecision {
    pub fn is_pinned(&self) -> bool {
        matches!(self.reason, UpdateReason::Pinned { .. })
    }
}

/// Options for update
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Command to update; `None` with `all` updates everything
    pub name: Option<String>,
    pub all: bool,
    pub force: bool,
}

impl From<&crate::cli::UpdateArgs> for UpdateOptions {
    fn from(args: &crate::cli::UpdateArgs) -> Self {
        Self {
            name: args.name.clone(),
            all: args.all,
            force: args.force,
        }
    }
}

/// Result of applying update decisions
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub updated: Vec<InstallOutcome>,
    /// Decisions that did not call for an update, or were declined
    pub skipped: Vec<UpdateDecision>,
    pub failed: Vec<ItemFailure>,
}

impl UpdateReport {
    pub fn total(&self) -> usize {
        self.updated.len() + self.skipped.len() + self.failed.len()
    }

    /// Skipped commands pinned to a commit hash
    pub fn pinned(&self) -> usize {
        self.skipped.iter().filter(|d| d.is_pinned()).count()
    }

    /// Skipped commands that needed an update but were declined
    pub fn declined(&self) -> usize {
        self.skipped.iter().filter(|d| d.needs_update).count()
    }

    /// Skipped commands already at their tracked version
    pub fn up_to_date(&self) -> usize {
        self.skipped.len() - self.pinned() - self.declined()
    }
}

/// High-level update operation
pub struct UpdateOperation<'a> {
    project: &'a Project,
    git: &'a dyn GitClient,
}

impl<'a> UpdateOperation<'a> {
    pub fn new(project: &'a Project, git: &'a dyn GitClient) -> Self {
        Self { project, git }
    }

    /// Version the desired state asks for, for a locked command
    fn tracked_version(&self, entry: &LockEntry) -> Result<Option<String>> {
        let config = self.project.load_config()?;
        Ok(config
            .find_by_repository(&entry.source)
            .and_then(|spec| spec.version))
    }

    /// Decide whether command `name` needs an update
    pub fn should_update(
        &self,
        name: &str,
        tracked_version: Option<&str>,
        force: bool,
    ) -> Result<UpdateDecision> {
        let lockfile = self.project.load_lockfile()?;
        let entry = lockfile
            .get(name)
            .ok_or_else(|| CmdpackError::CommandNotFound {
                name: name.to_string(),
            })?;
        Ok(self.decide(entry, tracked_version, force))
    }

    fn decide(&self, entry: &LockEntry, tracked: Option<&str>, force: bool) -> UpdateDecision {
        let tracked = tracked.filter(|v| !v.is_empty());
        let (needs_update, reason) = match tracked {
            _ if force => (true, UpdateReason::Forced),
            None => (true, UpdateReason::TracksLatest),
            Some(version) if is_commit_hash(version) => (
                false,
                UpdateReason::Pinned {
                    commit: version.to_string(),
                },
            ),
            Some(version) => {
                let url = repository::clone_url(&entry.source);
                match self.git.remote_ref_commit(&url, version) {
                    Ok(remote) if remote == entry.commit => (false, UpdateReason::UpToDate),
                    Ok(remote) => (
                        true,
                        UpdateReason::RemoteChanged {
                            local: entry.commit.clone(),
                            remote,
                        },
                    ),
                    Err(e) => {
                        log::debug!("Remote lookup of {version} for {} failed: {e}", entry.name);
                        (
                            true,
                            UpdateReason::RemoteUnknown {
                                error: e.to_string(),
                            },
                        )
                    }
                }
            }
        };

        UpdateDecision {
            name: entry.name.clone(),
            repository: entry.source.clone(),
            tracked_version: tracked.map(str::to_string),
            needs_update,
            reason,
        }
    }

    /// Decisions for the commands selected by `options`
    ///
    /// A single named command must exist; `all` covers every locked command
    /// in name order.
    pub fn plan(&self, options: &UpdateOptions) -> Result<Vec<UpdateDecision>> {
        let lockfile: Lockfile = self.project.load_lockfile()?;
        if options.name.is_none() && options.all && lockfile.is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<&LockEntry> = match (&options.name, options.all) {
            (Some(name), _) => vec![lockfile.get(name).ok_or_else(|| {
                CmdpackError::CommandNotFound { name: name.clone() }
            })?],
            (None, true) => lockfile.entries().collect(),
            (None, false) => {
                return Err(CmdpackError::ConfigInvalid {
                    message: "name a command to update, or pass --all".to_string(),
                });
            }
        };

        entries
            .into_iter()
            .map(|entry| {
                let tracked = self.tracked_version(entry)?;
                Ok(self.decide(entry, tracked.as_deref(), options.force))
            })
            .collect()
    }

    /// Reinstall the command a decision is about, at its tracked version
    ///
    /// The reinstall is forced and takes its name from the new metadata, so a
    /// renamed command moves to its new name.
    pub fn apply(&self, decision: &UpdateDecision) -> Result<InstallOutcome> {
        let spec = CommandSpec::new(decision.repository.clone(), decision.tracked_version.clone());
        let options = InstallOptions::new(spec).with_force(true).with_save(false);
        Installer::new(self.project, self.git).install(&options)
    }

    /// Apply every decision that needs an update and `confirm` accepts
    pub fn execute(
        &self,
        decisions: Vec<UpdateDecision>,
        mut confirm: impl FnMut(&UpdateDecision) -> Result<bool>,
    ) -> Result<UpdateReport> {
        let mut report = UpdateReport::default();

        for decision in decisions {
            if !decision.needs_update || !confirm(&decision)? {
                report.skipped.push(decision);
                continue;
            }
            match self.apply(&decision) {
                Ok(outcome) => report.updated.push(outcome),
                Err(e) => report.failed.push(ItemFailure::new(decision.name.clone(), e)),
            }
        }

        Ok(report)
    }
}
