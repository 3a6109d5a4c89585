//! Installation of a single command
//!
//! An install walks through these states, logging each transition:
//!
//! ```text
//! Validating → Cloned → StructureChecked → IdentityResolved → FilesCopied
//!   → DocWritten → MetadataUpdated → LockUpdated → ConfigUpdated → Done
//! ```
//!
//! Nothing is written to the project until `IdentityResolved`. From
//! `FilesCopied` through `LockUpdated` every created path is tracked by a
//! [`Transaction`] and removed again on failure, so a command never exists on
//! disk without a lock entry. Updating the desired-state file is best effort:
//! its failure is reported but does not undo the install.

pub mod files;

use std::fmt;

use chrono::Utc;

use crate::config::{CommandMetadata, InstallRecord};
use crate::error::{CmdpackError, Result};
use crate::git::GitClient;
use crate::project::Project;
use crate::resolver::{VersionResolver, find_existing_by_repository};
use crate::source::{CommandSpec, repository};
use crate::transaction::Transaction;

/// Install states, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Validating,
    Cloned,
    StructureChecked,
    IdentityResolved,
    FilesCopied,
    DocWritten,
    MetadataUpdated,
    LockUpdated,
    ConfigUpdated,
    Done,
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What to install and how
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub spec: CommandSpec,

    /// Overrides the name declared in the command's metadata
    pub name: Option<String>,

    /// Replace an existing command instead of failing
    pub force: bool,

    /// Record the repository in the desired-state file
    pub save: bool,
}

impl InstallOptions {
    pub fn new(spec: CommandSpec) -> Self {
        Self {
            spec,
            name: None,
            force: false,
            save: true,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }
}

/// Result of a successful install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Final on-disk name
    pub name: String,

    pub repository: String,

    /// Version declared by the command's metadata
    pub version: String,

    /// Ref that was checked out
    pub effective_version: String,

    /// Full commit hash, if known
    pub commit: Option<String>,

    /// Name the same repository was installed under before, if it changed
    pub renamed_from: Option<String>,

    /// Whether an existing command was deleted to make room
    pub replaced: bool,

    /// Why the desired-state file could not be updated
    pub config_warning: Option<String>,
}

/// Installs commands into a project
pub struct Installer<'a> {
    project: &'a Project,
    git: &'a dyn GitClient,
}

impl<'a> Installer<'a> {
    pub fn new(project: &'a Project, git: &'a dyn GitClient) -> Self {
        Self { project, git }
    }

    fn enter(&self, state: InstallState, spec: &CommandSpec) {
        log::debug!("install {spec}: {state}");
    }

    /// Install one command
    pub fn install(&self, options: &InstallOptions) -> Result<InstallOutcome> {
        let spec = &options.spec;
        self.enter(InstallState::Validating, spec);
        repository::validate_repository(&spec.repository)?;
        if let Some(name) = &options.name {
            repository::validate_command_name(name)?;
        }

        let clone_dir = crate::temp::clone_dir()?;
        let checkout = clone_dir.path().join("repo");
        let url = repository::clone_url(&spec.repository);
        self.git
            .clone_repo(&url, &checkout, spec.version.as_deref())?;
        self.enter(InstallState::Cloned, spec);

        let resolved = VersionResolver::new(self.git).resolve(spec.version.as_deref(), &checkout)?;
        let mut metadata = files::check_structure(&checkout, &spec.repository)?;
        self.enter(InstallState::StructureChecked, spec);

        let name = match &options.name {
            Some(name) => name.clone(),
            None if !metadata.name.trim().is_empty() => metadata.name.trim().to_string(),
            None => repository::derive_command_name(&spec.repository)?,
        };
        repository::validate_command_name(&name)?;

        let mut lockfile = self.project.load_lockfile()?;
        let (renamed_from, replaced) = self.resolve_identity(&name, spec, options.force, &lockfile)?;
        self.enter(InstallState::IdentityResolved, spec);

        let mut transaction = Transaction::new();
        let target = self.project.command_dir(&name);
        transaction.track_dir_created(&target);
        files::copy_command(&checkout, &target)?;
        self.enter(InstallState::FilesCopied, spec);

        let doc = self.project.standalone_doc(&name);
        transaction.track_file_created(&doc);
        files::write_standalone_doc(&metadata.entry_path(&target), &doc)?;
        self.enter(InstallState::DocWritten, spec);

        metadata.name.clone_from(&name);
        metadata.repository.clone_from(&spec.repository);
        metadata.save(&target)?;
        self.enter(InstallState::MetadataUpdated, spec);

        lockfile.record_install(
            InstallRecord {
                name: name.clone(),
                version: metadata.version.clone(),
                source: spec.repository.clone(),
                effective_version: resolved.effective.clone(),
                commit: resolved.commit.clone(),
            },
            Utc::now(),
        );
        self.project.save_lockfile(&lockfile)?;
        transaction.commit();
        self.enter(InstallState::LockUpdated, spec);

        let config_warning = if options.save {
            match self.update_config(spec) {
                Ok(()) => {
                    self.enter(InstallState::ConfigUpdated, spec);
                    None
                }
                Err(e) => {
                    log::warn!("Installed {name} but could not update the desired state: {e}");
                    Some(e.to_string())
                }
            }
        } else {
            None
        };

        self.enter(InstallState::Done, spec);
        Ok(InstallOutcome {
            name,
            repository: spec.repository.clone(),
            version: metadata.version,
            effective_version: resolved.effective,
            commit: resolved.commit,
            renamed_from,
            replaced,
            config_warning,
        })
    }

    /// Decide whether `name` may be (re)used for `spec.repository`
    ///
    /// With `force`, conflicting commands are deleted here and are not
    /// restored if the install fails later. Returns the previous name of the
    /// repository (when it differs) and whether anything was deleted.
    fn resolve_identity(
        &self,
        name: &str,
        spec: &CommandSpec,
        force: bool,
        lockfile: &crate::config::Lockfile,
    ) -> Result<(Option<String>, bool)> {
        let commands_dir = self.project.commands_dir();
        let previous = lockfile
            .find_by_repository(&spec.repository)
            .map(|entry| entry.name.clone())
            .or_else(|| find_existing_by_repository(&commands_dir, &spec.repository))
            .filter(|previous| previous != name);

        let name_taken = self.project.command_dir(name).exists()
            || self.project.standalone_doc(name).exists()
            || lockfile.contains(name);

        if !force {
            if name_taken {
                return match self.owner_of(name, lockfile) {
                    Some(owner) if !repository::same_repository(&owner, &spec.repository) => {
                        Err(CmdpackError::NameConflict {
                            name: name.to_string(),
                            existing: owner,
                            repository: spec.repository.clone(),
                        })
                    }
                    _ => Err(CmdpackError::CommandAlreadyExists {
                        name: name.to_string(),
                    }),
                };
            }
            if let Some(previous) = previous {
                return Err(CmdpackError::AlreadyInstalled {
                    repository: spec.repository.clone(),
                    name: previous,
                });
            }
            return Ok((None, false));
        }

        let mut replaced = false;
        if name_taken {
            log::debug!("Replacing existing command '{name}'");
            files::remove_installed(self.project, name)?;
            replaced = true;
        }
        if let Some(previous) = &previous {
            log::debug!("Removing '{previous}', {} is now installed as '{name}'", spec.repository);
            files::remove_installed(self.project, previous)?;
            replaced = true;
        }
        Ok((previous, replaced))
    }

    /// Repository that currently owns `name`, from the lock or its metadata
    fn owner_of(&self, name: &str, lockfile: &crate::config::Lockfile) -> Option<String> {
        lockfile.get(name).map(|entry| entry.source.clone()).or_else(|| {
            CommandMetadata::load(&self.project.command_dir(name))
                .ok()
                .map(|metadata| metadata.repository)
                .filter(|repo| !repo.is_empty())
        })
    }

    fn update_config(&self, spec: &CommandSpec) -> Result<()> {
        let mut config = self.project.load_config()?;
        if config.add(spec) {
            self.project.save_config(&config)?;
        }
        Ok(())
    }
}
