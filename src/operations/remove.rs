//! Remove operation
//!
//! Deletes a command's directory, its standalone document and its lock
//! entry, and optionally its desired-state entry.

use crate::cli::RemoveArgs;
use crate::config::CommandMetadata;
use crate::error::{CmdpackError, Result};
use crate::installer::files;
use crate::project::Project;

/// Configuration options for remove
#[derive(Debug, Clone)]
pub struct RemoveOptions {
    pub name: String,

    /// Also drop the repository from the desired-state file
    pub save: bool,
}

impl From<&RemoveArgs> for RemoveOptions {
    fn from(args: &RemoveArgs) -> Self {
        Self {
            name: args.name.clone(),
            save: !args.no_save,
        }
    }
}

/// What a removal did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub name: String,

    /// Repository the command came from, when known
    pub repository: Option<String>,

    /// Whether files were deleted from disk
    pub files_removed: bool,

    /// Whether the desired-state file was rewritten
    pub config_updated: bool,

    /// Why the desired-state file could not be updated
    pub config_warning: Option<String>,
}

/// High-level remove operation
pub struct RemoveOperation<'a> {
    project: &'a Project,
}

impl<'a> RemoveOperation<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Remove command `options.name`
    ///
    /// Fails with "not installed" when neither a lock entry nor a directory
    /// exists for the name.
    pub fn execute(&self, options: &RemoveOptions) -> Result<RemoveOutcome> {
        let name = options.name.as_str();
        let mut lockfile = self.project.load_lockfile()?;

        let locked = lockfile.get(name).map(|entry| entry.source.clone());
        let on_disk = self.project.command_dir(name).exists()
            || self.project.standalone_doc(name).exists();
        if locked.is_none() && !on_disk {
            return Err(CmdpackError::CommandNotFound {
                name: name.to_string(),
            });
        }

        let repository = locked.or_else(|| {
            CommandMetadata::load(&self.project.command_dir(name))
                .ok()
                .map(|metadata| metadata.repository)
        });

        // Lock first: files left behind after a failed delete show up as
        // untracked, never as a lock entry without files.
        if lockfile.remove(name).is_some() {
            self.project.save_lockfile(&lockfile)?;
        }
        let files_removed = files::remove_installed(self.project, name)?;
        log::debug!("Removed command '{name}'");

        let mut outcome = RemoveOutcome {
            name: name.to_string(),
            repository,
            files_removed,
            config_updated: false,
            config_warning: None,
        };

        if options.save {
            if let Some(repo) = outcome.repository.clone() {
                match self.remove_from_config(&repo) {
                    Ok(updated) => outcome.config_updated = updated,
                    Err(e) => {
                        log::warn!("Removed {name} but could not update the desired state: {e}");
                        outcome.config_warning = Some(e.to_string());
                    }
                }
            }
        }

        Ok(outcome)
    }

    fn remove_from_config(&self, repository: &str) -> Result<bool> {
        let mut config = self.project.load_config()?;
        let changed = config.remove_repository(repository);
        if changed {
            self.project.save_config(&config)?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::{InstallOptions, Installer};
    use crate::source::CommandSpec;
    use crate::test_fixtures::{FakeGit, FakeRepo, create_project};

    fn installed_project() -> (tempfile::TempDir, Project) {
        let (temp, project) = create_project();
        let git = FakeGit::new()
            .with_repo("owner/a", FakeRepo::command("a", "1.0.0"))
            .with_repo("owner/b", FakeRepo::command("b", "1.0.0"));
        for spec in ["owner/a", "owner/b@v1"] {
            Installer::new(&project, &git)
                .install(&InstallOptions::new(CommandSpec::parse(spec)))
                .unwrap();
        }
        (temp, project)
    }

    fn options(name: &str, save: bool) -> RemoveOptions {
        RemoveOptions {
            name: name.to_string(),
            save,
        }
    }

    #[test]
    fn test_remove_deletes_everything() {
        let (_temp, project) = installed_project();

        let outcome = RemoveOperation::new(&project)
            .execute(&options("b", true))
            .unwrap();

        assert!(outcome.files_removed);
        assert!(outcome.config_updated);
        assert_eq!(outcome.repository.as_deref(), Some("owner/b"));
        assert!(!project.command_dir("b").exists());
        assert!(!project.standalone_doc("b").exists());
        assert!(!project.load_lockfile().unwrap().contains("b"));
        assert_eq!(project.load_config().unwrap().commands, vec!["owner/a"]);
    }

    #[test]
    fn test_remove_without_save_keeps_desired_state() {
        let (_temp, project) = installed_project();

        let outcome = RemoveOperation::new(&project)
            .execute(&options("a", false))
            .unwrap();

        assert!(!outcome.config_updated);
        assert!(!project.load_lockfile().unwrap().contains("a"));
        assert_eq!(
            project.load_config().unwrap().commands,
            vec!["owner/a", "owner/b@v1"]
        );
    }

    #[test]
    fn test_remove_unknown_command() {
        let (_temp, project) = installed_project();
        let err = RemoveOperation::new(&project)
            .execute(&options("zzz", true))
            .unwrap_err();
        assert!(matches!(err, CmdpackError::CommandNotFound { .. }));
    }

    #[test]
    fn test_remove_untracked_directory() {
        let (_temp, project) = create_project();
        std::fs::create_dir_all(project.command_dir("stray")).unwrap();

        let outcome = RemoveOperation::new(&project)
            .execute(&options("stray", true))
            .unwrap();

        assert!(outcome.files_removed);
        assert!(outcome.repository.is_none());
        assert!(!project.command_dir("stray").exists());
    }

    #[test]
    fn test_lock_entry_dropped_before_files() {
        let (_temp, project) = installed_project();
        let doc = project.standalone_doc("b");
        std::fs::remove_file(&doc).unwrap();
        std::fs::create_dir_all(doc.join("nested")).unwrap();

        let err = RemoveOperation::new(&project)
            .execute(&options("b", true))
            .unwrap_err();

        assert!(matches!(err, CmdpackError::FileRemoveFailed { .. }));
        assert!(!project.load_lockfile().unwrap().contains("b"));
        assert!(project.load_lockfile().unwrap().contains("a"));
    }

    #[test]
    fn test_remove_lock_entry_without_files() {
        let (_temp, project) = installed_project();
        files::remove_installed(&project, "a").unwrap();

        let outcome = RemoveOperation::new(&project)
            .execute(&options("a", true))
            .unwrap();

        assert!(!outcome.files_removed);
        assert!(!project.load_lockfile().unwrap().contains("a"));
    }
}
