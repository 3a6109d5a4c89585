//! List operation
//!
//! Lists every command the project knows about: lock entries plus command
//! directories on disk. Broken commands are reported, never omitted.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{CommandMetadata, LockEntry};
use crate::error::Result;
use crate::installer::files;
use crate::project::Project;

/// One command in a listing
#[derive(Debug, Clone, Serialize)]
pub struct CommandListing {
    pub name: String,

    /// Lock entry, absent for untracked directories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<LockEntry>,

    /// Installed metadata, absent when it cannot be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CommandMetadata>,

    /// Structure problem, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broken: Option<String>,

    /// Whether the lock tracks this command
    pub tracked: bool,
}

impl CommandListing {
    pub fn is_broken(&self) -> bool {
        self.broken.is_some()
    }

    /// Repository from the lock, falling back to the metadata
    pub fn repository(&self) -> Option<&str> {
        self.lock
            .as_ref()
            .map(|entry| entry.source.as_str())
            .or_else(|| self.metadata.as_ref().map(|m| m.repository.as_str()))
    }

    /// Version from the lock, falling back to the metadata
    pub fn version(&self) -> Option<&str> {
        self.lock
            .as_ref()
            .map(|entry| entry.version.as_str())
            .or_else(|| self.metadata.as_ref().map(|m| m.version.as_str()))
    }
}

/// High-level list operation
pub struct ListOperation<'a> {
    project: &'a Project,
}

impl<'a> ListOperation<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// All commands in name order
    pub fn list(&self) -> Result<Vec<CommandListing>> {
        let lockfile = self.project.load_lockfile()?;

        let mut names: BTreeSet<String> = lockfile.entries().map(|e| e.name.clone()).collect();
        names.extend(self.project.installed_dirs()?);

        Ok(names
            .into_iter()
            .map(|name| {
                let lock = lockfile.get(&name).cloned();
                describe(self.project, name, lock)
            })
            .collect())
    }

    /// One command, or `None` when it is neither locked nor on disk
    pub fn find(&self, name: &str) -> Result<Option<CommandListing>> {
        let lock = self.project.load_lockfile()?.get(name).cloned();
        let on_disk =
            self.project.command_dir(name).is_dir() || self.project.standalone_doc(name).is_file();
        if lock.is_none() && !on_disk {
            return Ok(None);
        }
        Ok(Some(describe(self.project, name.to_string(), lock)))
    }
}

fn describe(project: &Project, name: String, lock: Option<LockEntry>) -> CommandListing {
    let broken = files::check_installed(project, &name);
    let metadata = CommandMetadata::load(&project.command_dir(&name)).ok();
    CommandListing {
        tracked: lock.is_some(),
        name,
        lock,
        metadata,
        broken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::{InstallOptions, Installer};
    use crate::source::CommandSpec;
    use crate::test_fixtures::{FakeGit, FakeRepo, create_project, metadata_yaml};
    use std::fs;

    fn install(project: &Project, names: &[&str]) {
        let mut git = FakeGit::new();
        for name in names {
            git = git.with_repo(&format!("owner/{name}"), FakeRepo::command(name, "1.0.0"));
        }
        for name in names {
            Installer::new(project, &git)
                .install(&InstallOptions::new(CommandSpec::parse(&format!("owner/{name}"))))
                .unwrap();
        }
    }

    #[test]
    fn test_list_empty_project() {
        let (_temp, project) = create_project();
        assert!(ListOperation::new(&project).list().unwrap().is_empty());
    }

    #[test]
    fn test_list_healthy_commands() {
        let (_temp, project) = create_project();
        install(&project, &["b", "a"]);

        let listing = ListOperation::new(&project).list().unwrap();
        let names: Vec<&str> = listing.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(listing.iter().all(|c| c.tracked && !c.is_broken()));
        assert_eq!(listing[0].repository(), Some("owner/a"));
        assert_eq!(listing[0].version(), Some("1.0.0"));
    }

    #[test]
    fn test_missing_standalone_doc_is_broken() {
        let (_temp, project) = create_project();
        install(&project, &["a"]);
        fs::remove_file(project.standalone_doc("a")).unwrap();

        let listing = ListOperation::new(&project).list().unwrap();
        assert_eq!(listing.len(), 1);
        assert!(listing[0].is_broken());
        assert_eq!(listing[0].broken.as_deref(), Some("standalone .md file not found"));
    }

    #[test]
    fn test_locked_but_missing_directory_is_listed() {
        let (_temp, project) = create_project();
        install(&project, &["a"]);
        fs::remove_dir_all(project.command_dir("a")).unwrap();

        let listing = ListOperation::new(&project).list().unwrap();
        assert_eq!(listing[0].broken.as_deref(), Some("command directory not found"));
        assert!(listing[0].metadata.is_none());
        assert_eq!(listing[0].repository(), Some("owner/a"));
    }

    #[test]
    fn test_untracked_directory_is_listed() {
        let (_temp, project) = create_project();
        let dir = project.command_dir("stray");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            CommandMetadata::path_in(&dir),
            metadata_yaml("stray", "0.1.0", "someone/stray"),
        )
        .unwrap();
        fs::write(dir.join("index.md"), "# stray\n").unwrap();
        fs::write(project.standalone_doc("stray"), "# stray\n").unwrap();

        let listing = ListOperation::new(&project).list().unwrap();
        assert_eq!(listing.len(), 1);
        assert!(!listing[0].tracked);
        assert!(!listing[0].is_broken());
        assert_eq!(listing[0].repository(), Some("someone/stray"));
    }

    #[test]
    fn test_find() {
        let (_temp, project) = create_project();
        install(&project, &["a"]);

        let op = ListOperation::new(&project);
        assert_eq!(op.find("a").unwrap().unwrap().name, "a");
        assert!(op.find("zzz").unwrap().is_none());
    }

    #[test]
    fn test_listing_serializes_without_empty_fields() {
        let (_temp, project) = create_project();
        install(&project, &["a"]);

        let listing = ListOperation::new(&project).list().unwrap();
        let json = serde_json::to_value(&listing[0]).unwrap();
        assert_eq!(json["name"], "a");
        assert_eq!(json["tracked"], true);
        assert_eq!(json["lock"]["source"], "owner/a");
        assert!(json.get("broken").is_none());
    }
}
