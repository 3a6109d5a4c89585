//! Common test utilities for cmdpack integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A sandbox holding a project directory and local command repositories
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project root
    pub path: PathBuf,
    /// Directory the fixture repositories live under
    pub repos: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        let repos = temp.path().join("repos");
        fs::create_dir_all(&path).expect("Failed to create project directory");
        fs::create_dir_all(&repos).expect("Failed to create repos directory");
        Self { temp, path, repos }
    }

    /// `cmdpack` running inside the project directory
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cmdpack").expect("cmdpack binary");
        cmd.current_dir(&self.path)
            .env_remove("CMDPACK_PROJECT")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a git repository at `repos/<owner>/<name>` holding a command
    ///
    /// Returns the repository path as a string usable on the command line.
    pub fn command_repo(&self, owner: &str, name: &str, tags: &[&str]) -> String {
        let dir = self.repos.join(owner).join(name);
        fs::create_dir_all(&dir).expect("Failed to create repository directory");
        fs::write(
            dir.join("cmdpack.yaml"),
            format!(
                "name: {name}\nversion: 1.0.0\ndescription: The {name} command\n\
                 author: Tester\nrepository: {owner}/{name}\nentry: index.md\n"
            ),
        )
        .expect("Failed to write metadata");
        fs::write(dir.join("index.md"), format!("# {name}\n")).expect("Failed to write entry");

        let repo = git2::Repository::init(&dir).expect("Failed to init repository");
        commit_all(&repo, "Initial commit");
        for tag in tags {
            let head = repo
                .head()
                .and_then(|h| h.peel(git2::ObjectType::Commit))
                .expect("HEAD commit");
            repo.tag_lightweight(tag, &head, false).expect("Failed to tag");
        }

        path_arg(&dir)
    }
}

fn commit_all(repo: &git2::Repository, message: &str) {
    let mut index = repo.index().expect("index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("stage");
    index.write().expect("write index");
    let tree = repo
        .find_tree(index.write_tree().expect("write tree"))
        .expect("find tree");
    let signature = git2::Signature::now("Tester", "tester@example.com").expect("signature");
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])
        .expect("commit");
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
