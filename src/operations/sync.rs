//! Sync operation
//!
//! Reconciles installed state (the lock) with desired state (`cmdpack.yaml`).
//! Entries on both sides are keyed by their normalized `owner/repo` path, or
//! by the name derived from the repository when it has no such path.

use std::collections::{BTreeMap, HashSet};

use crate::config::Lockfile;
use crate::error::Result;
use crate::git::GitClient;
use crate::installer::{InstallOptions, InstallOutcome, Installer};
use crate::operations::ItemFailure;
use crate::operations::remove::{RemoveOperation, RemoveOptions};
use crate::project::Project;
use crate::source::{CommandSpec, repository};

/// An installed command as seen by the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledCommand {
    pub name: String,
    pub repository: String,
}

impl InstalledCommand {
    pub fn from_lockfile(lockfile: &Lockfile) -> Vec<Self> {
        lockfile
            .entries()
            .map(|entry| Self {
                name: entry.name.clone(),
                repository: entry.source.clone(),
            })
            .collect()
    }
}

/// The actions that bring installed state in line with desired state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Desired entries with nothing installed, in declaration order
    pub to_install: Vec<CommandSpec>,

    /// Installed command names nothing desires, in name order
    pub to_remove: Vec<String>,
}

impl SyncPlan {
    pub fn in_sync(&self) -> bool {
        self.to_install.is_empty() && self.to_remove.is_empty()
    }
}

/// Identity used to match desired and installed entries
fn sync_key(repo: &str) -> String {
    repository::repository_path(repo)
        .or_else(|| repository::derive_command_name(repo).ok())
        .unwrap_or_else(|| repo.trim().to_string())
}

/// Compute what to install and what to remove
///
/// Pure: the same inputs always give the same plan. Duplicate desired
/// entries for one repository collapse into the first.
pub fn analyze(desired: &[CommandSpec], installed: &[InstalledCommand]) -> SyncPlan {
    let installed_keys: HashSet<String> = installed
        .iter()
        .map(|command| sync_key(&command.repository))
        .collect();

    let mut seen = HashSet::new();
    let to_install = desired
        .iter()
        .filter(|spec| seen.insert(sync_key(&spec.repository)))
        .filter(|spec| !installed_keys.contains(&sync_key(&spec.repository)))
        .cloned()
        .collect();

    let desired_keys: HashSet<String> = desired.iter().map(|spec| sync_key(&spec.repository)).collect();
    let to_remove = installed
        .iter()
        .filter(|command| !desired_keys.contains(&sync_key(&command.repository)))
        .map(|command| (command.name.clone(), ()))
        .collect::<BTreeMap<_, _>>()
        .into_keys()
        .collect();

    SyncPlan {
        to_install,
        to_remove,
    }
}

/// Result of executing a sync plan
#[derive(Debug, Default)]
pub struct SyncReport {
    pub installed: Vec<InstallOutcome>,
    pub removed: Vec<String>,
    pub failed: Vec<ItemFailure>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.installed.len() + self.removed.len() + self.failed.len()
    }
}

/// High-level sync operation
pub struct SyncOperation<'a> {
    project: &'a Project,
    git: &'a dyn GitClient,
}

impl<'a> SyncOperation<'a> {
    pub fn new(project: &'a Project, git: &'a dyn GitClient) -> Self {
        Self { project, git }
    }

    /// Plan for the project's current desired and installed state
    pub fn analyze(&self) -> Result<SyncPlan> {
        let desired = self.project.load_config()?.entries();
        let installed = InstalledCommand::from_lockfile(&self.project.load_lockfile()?);
        Ok(analyze(&desired, &installed))
    }

    /// Carry out a plan
    ///
    /// Removals run first so a replacement can take over a freed name.
    /// Installs never force and never rewrite the desired state; removals
    /// keep the desired state as is. Each item succeeds or fails on its own.
    pub fn execute(&self, plan: &SyncPlan) -> SyncReport {
        let mut report = SyncReport::default();

        let remover = RemoveOperation::new(self.project);
        for name in &plan.to_remove {
            let options = RemoveOptions {
                name: name.clone(),
                save: false,
            };
            match remover.execute(&options) {
                Ok(_) => report.removed.push(name.clone()),
                Err(e) => report.failed.push(ItemFailure::new(name.clone(), e)),
            }
        }

        let installer = Installer::new(self.project, self.git);
        for spec in &plan.to_install {
            let options = InstallOptions::new(spec.clone()).with_save(false);
            match installer.install(&options) {
                Ok(outcome) => report.installed.push(outcome),
                Err(e) => report.failed.push(ItemFailure::new(spec.to_string(), e)),
            }
        }

        report
    }
}
