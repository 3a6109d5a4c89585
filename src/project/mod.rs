//! Project detection and layout
//!
//! ## Project Structure
//!
//! ```text
//! <root>/
//! ├── cmdpack.yaml          # Desired state (user-edited)
//! ├── cmdpack.lock          # Installed state (machine-maintained)
//! └── .claude/commands/
//!     ├── review/           # Installed command directory
//!     │   ├── cmdpack.yaml  # Command metadata
//!     │   └── index.md      # Entry document
//!     └── review.md         # Standalone copy of the entry document
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Lockfile, ProjectConfig};
use crate::error::{CmdpackError, Result};

/// Desired-state filename at the project root
pub const PROJECT_CONFIG_FILE: &str = "cmdpack.yaml";

/// Lockfile filename at the project root
pub const LOCKFILE_NAME: &str = "cmdpack.lock";

/// Commands directory, relative to the project root
pub const COMMANDS_DIR: &str = ".claude/commands";

/// A project whose commands cmdpack manages
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project
    pub root: PathBuf,
}

impl Project {
    /// Project rooted at `root`, whether or not it has been set up yet
    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Whether `dir` carries any project marker
    pub fn exists(dir: &Path) -> bool {
        dir.join(PROJECT_CONFIG_FILE).is_file()
            || dir.join(LOCKFILE_NAME).is_file()
            || dir.join(COMMANDS_DIR).is_dir()
    }

    /// Find a project root by searching upward from `start`
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        start.ancestors().find(|dir| Self::exists(dir)).map(Path::to_path_buf)
    }

    /// Locate the project for `start` (or the current directory)
    ///
    /// The nearest ancestor with a project marker wins. Without one, `start`
    /// itself becomes the root so a first install can set the project up.
    pub fn discover(start: Option<&Path>) -> Result<Self> {
        let start = match start {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir()?,
        };

        if !start.is_dir() {
            return Err(CmdpackError::ProjectNotFound {
                path: start.display().to_string(),
            });
        }

        let start = dunce::canonicalize(&start).map_err(|e| CmdpackError::FileReadFailed {
            path: start.display().to_string(),
            reason: e.to_string(),
        })?;

        let root = Self::find_from(&start).unwrap_or(start);
        log::debug!("Using project root {}", root.display());
        Ok(Self { root })
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(PROJECT_CONFIG_FILE)
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.root.join(LOCKFILE_NAME)
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.root.join(COMMANDS_DIR)
    }

    /// Installed directory of command `name`
    pub fn command_dir(&self, name: &str) -> PathBuf {
        self.commands_dir().join(name)
    }

    /// Standalone document of command `name`
    pub fn standalone_doc(&self, name: &str) -> PathBuf {
        self.commands_dir().join(format!("{name}.md"))
    }

    pub fn load_config(&self) -> Result<ProjectConfig> {
        ProjectConfig::load(&self.config_path())
    }

    pub fn save_config(&self, config: &ProjectConfig) -> Result<()> {
        config.save(&self.config_path())
    }

    pub fn load_lockfile(&self) -> Result<Lockfile> {
        Lockfile::load(&self.lockfile_path())
    }

    pub fn save_lockfile(&self, lockfile: &Lockfile) -> Result<()> {
        lockfile.save(&self.lockfile_path())
    }

    /// Names of all command directories on disk, sorted
    pub fn installed_dirs(&self) -> Result<Vec<String>> {
        let dir = self.commands_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| CmdpackError::FileReadFailed {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Create `cmdpack.yaml` for a new project
    ///
    /// Fails when the file already exists unless `force` is set.
    pub fn init(&self, config: &ProjectConfig, force: bool) -> Result<PathBuf> {
        let path = self.config_path();
        if path.exists() && !force {
            return Err(CmdpackError::ProjectAlreadyInitialized {
                path: path.display().to_string(),
            });
        }
        self.save_config(config)?;
        Ok(path)
    }
}
