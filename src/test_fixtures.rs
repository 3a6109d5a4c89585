//! Test fixtures and utilities for reducing test setup duplication.
//!
//! - [`create_temp_dir`] / [`create_project`]: sandboxes under the temp base
//! - [`init_command_repo`], [`commit_all`], [`tag`]: real git repositories
//!   holding a command, for exercising the git2 client
//! - [`FakeGit`]: an in-memory [`GitClient`] whose "clones" write fixture
//!   files, so installer and updater tests never touch the network
//!
//! ```ignore
//! let git = FakeGit::new().with_repo("owner/review", FakeRepo::command("review", "1.0.0"));
//! let (_temp, project) = create_project();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{CmdpackError, Result};
use crate::git::GitClient;
use crate::project::Project;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Create an empty project rooted in a fresh temp directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_project() -> (TempDir, Project) {
    let temp = create_temp_dir();
    let project = Project::at(temp.path());
    (temp, project)
}

/// Metadata YAML for a fixture command
pub fn metadata_yaml(name: &str, version: &str, repository: &str) -> String {
    format!(
        "name: {name}\nversion: {version}\ndescription: The {name} command\n\
         author: Tester\nrepository: {repository}\nentry: index.md\ntags: [test]\n"
    )
}

/// Stage everything in the work tree and commit it on HEAD.
///
/// # Panics
///
/// Panics if any git operation fails.
pub fn commit_all(repo: &git2::Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("Failed to stage files");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let signature = git2::Signature::now("Tester", "tester@example.com").expect("signature");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .expect("Failed to commit")
}

/// Create a lightweight tag at HEAD.
///
/// # Panics
///
/// Panics if the tag cannot be created.
pub fn tag(repo: &git2::Repository, name: &str) {
    let head = repo
        .head()
        .and_then(|head| head.peel(git2::ObjectType::Commit))
        .expect("Failed to resolve HEAD");
    repo.tag_lightweight(name, &head, false)
        .expect("Failed to create tag");
}

/// Create a git repository at `<temp>/owner/<name>` holding a command with
/// one commit.
///
/// # Panics
///
/// Panics if any step fails.
#[must_use]
pub fn init_command_repo(name: &str, version: &str) -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let path = temp.path().join("owner").join(name);
    fs::create_dir_all(&path).expect("Failed to create repository directory");

    let repo = git2::Repository::init(&path).expect("Failed to init git repository");
    fs::write(
        path.join("cmdpack.yaml"),
        metadata_yaml(name, version, &format!("https://github.com/owner/{name}")),
    )
    .expect("Failed to write metadata");
    fs::write(path.join("index.md"), format!("# {name}\n")).expect("Failed to write entry");
    commit_all(&repo, "initial");

    (temp, path)
}

/// A repository served by [`FakeGit`]
#[derive(Debug, Clone)]
pub struct FakeRepo {
    files: Vec<(String, String)>,
    commit: String,
    tags: Vec<String>,
    remote_refs: HashMap<String, String>,
}

impl FakeRepo {
    pub const DEFAULT_COMMIT: &'static str = "0123456789abcdef0123456789abcdef01234567";

    /// A well-formed command named `name`
    pub fn command(name: &str, version: &str) -> Self {
        Self {
            files: vec![
                (
                    "cmdpack.yaml".to_string(),
                    metadata_yaml(name, version, &format!("https://github.com/owner/{name}")),
                ),
                ("index.md".to_string(), format!("# {name}\n")),
            ],
            commit: Self::DEFAULT_COMMIT.to_string(),
            tags: Vec::new(),
            remote_refs: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.retain(|(p, _)| p != path);
        self.files.push((path.to_string(), content.to_string()));
        self
    }

    pub fn without_file(mut self, path: &str) -> Self {
        self.files.retain(|(p, _)| p != path);
        self
    }

    /// Tags in creation order; the last one is the latest
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_remote_ref(mut self, git_ref: &str, commit: &str) -> Self {
        self.remote_refs
            .insert(git_ref.to_string(), commit.to_string());
        self
    }
}

const FAKE_URL_FILE: &str = "FAKE_URL";
const FAKE_HEAD_FILE: &str = "HEAD";

/// In-memory [`GitClient`] for tests
#[derive(Debug, Default)]
pub struct FakeGit {
    repos: HashMap<String, FakeRepo>,
    clones: RefCell<Vec<(String, Option<String>)>>,
    checkouts: RefCell<Vec<String>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `repo` at clone URL `url` (shorthand is expanded like the
    /// installer does)
    pub fn with_repo(mut self, url: &str, repo: FakeRepo) -> Self {
        self.repos
            .insert(crate::source::repository::clone_url(url), repo);
        self
    }

    /// `(url, ref)` of every clone so far
    pub fn clones(&self) -> Vec<(String, Option<String>)> {
        self.clones.borrow().clone()
    }

    /// Refs checked out after cloning
    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.borrow().clone()
    }

    fn repo(&self, url: &str) -> Result<&FakeRepo> {
        self.repos
            .get(url)
            .or_else(|| self.repos.get(&crate::source::repository::clone_url(url)))
            .ok_or_else(|| CmdpackError::GitCloneFailed {
                url: url.to_string(),
                reason: "Repository not found".to_string(),
            })
    }

    fn repo_at(&self, path: &Path) -> Result<&FakeRepo> {
        let url = fs::read_to_string(path.join(".git").join(FAKE_URL_FILE)).map_err(|e| {
            CmdpackError::GitOpenFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        self.repo(&url)
    }
}

impl GitClient for FakeGit {
    fn clone_repo(&self, url: &str, target: &Path, git_ref: Option<&str>) -> Result<()> {
        self.clones
            .borrow_mut()
            .push((url.to_string(), git_ref.map(str::to_string)));
        let repo = self.repo(url)?;

        for (path, content) in &repo.files {
            let file = target.join(path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, content)?;
        }

        let git_dir = target.join(".git");
        fs::create_dir_all(&git_dir)?;
        fs::write(git_dir.join(FAKE_URL_FILE), url)?;
        fs::write(git_dir.join(FAKE_HEAD_FILE), &repo.commit)?;
        Ok(())
    }

    fn checkout(&self, repo_path: &Path, git_ref: &str) -> Result<()> {
        self.repo_at(repo_path)?;
        self.checkouts.borrow_mut().push(git_ref.to_string());
        Ok(())
    }

    fn latest_tag(&self, repo_path: &Path) -> Result<String> {
        self.repo_at(repo_path)?
            .tags
            .last()
            .cloned()
            .ok_or_else(|| CmdpackError::GitRefResolveFailed {
                git_ref: "latest tag".to_string(),
                reason: "no tags".to_string(),
            })
    }

    fn current_commit(&self, repo_path: &Path) -> Result<String> {
        self.repo_at(repo_path)?;
        Ok(fs::read_to_string(repo_path.join(".git").join(FAKE_HEAD_FILE))?)
    }

    fn ref_commit(&self, repo_path: &Path, _git_ref: &str) -> Result<String> {
        self.current_commit(repo_path)
    }

    fn remote_ref_commit(&self, url: &str, git_ref: &str) -> Result<String> {
        self.repo(url)?
            .remote_refs
            .get(git_ref)
            .cloned()
            .ok_or_else(|| CmdpackError::GitRefResolveFailed {
                git_ref: git_ref.to_string(),
                reason: format!("ref not found on {url}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_command_repo() {
        let (_temp, path) = init_command_repo("review", "1.0.0");
        assert!(path.join(".git").exists());
        assert!(path.join("cmdpack.yaml").exists());
        assert!(path.ends_with("owner/review"));
    }

    #[test]
    fn test_fake_git_clone_writes_files() {
        let git = FakeGit::new().with_repo("owner/review", FakeRepo::command("review", "1.0.0"));
        let temp = create_temp_dir();
        let target = temp.path().join("clone");

        git.clone_repo("https://github.com/owner/review.git", &target, Some("v1"))
            .unwrap();

        assert!(target.join("index.md").exists());
        assert_eq!(git.current_commit(&target).unwrap(), FakeRepo::DEFAULT_COMMIT);
        assert_eq!(
            git.clones(),
            vec![(
                "https://github.com/owner/review.git".to_string(),
                Some("v1".to_string())
            )]
        );
    }

    #[test]
    fn test_fake_git_unknown_repository() {
        let git = FakeGit::new();
        let temp = create_temp_dir();
        assert!(git.clone_repo("owner/none", temp.path(), None).is_err());
    }
}
