//! Rollback guard for installs
//!
//! Every path an install creates is tracked. If the guard is dropped before
//! [`Transaction::commit`] is called, the tracked paths are deleted again so
//! the project is back in its pre-install state.
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! fs::create_dir_all(&dir)?;
//! transaction.track_dir_created(&dir);
//!
//! // ... more fallible steps ...
//!
//! transaction.commit();
//! ```
//!
//! Only filesystem changes are covered. Files the caller deleted on purpose
//! (a forced reinstall) are not restored.

use std::fs;
use std::path::PathBuf;

/// Tracks created paths and removes them unless committed
#[derive(Debug, Default)]
pub struct Transaction {
    /// Files created during this transaction
    created_files: Vec<PathBuf>,

    /// Directories created during this transaction (removed recursively)
    created_dirs: Vec<PathBuf>,

    committed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a file that was created during this transaction
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.push(path.into());
    }

    /// Track a directory that was created during this transaction
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.push(path.into());
    }

    /// Keep everything that was created
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Delete every tracked path
    ///
    /// Failures are logged and do not stop the remaining deletions.
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        for path in self.created_files.drain(..) {
            if path.is_file() {
                if let Err(e) = fs::remove_file(&path) {
                    log::warn!("Rollback could not remove {}: {e}", path.display());
                }
            }
        }

        for path in self.created_dirs.drain(..).rev() {
            if path.is_dir() {
                if let Err(e) = fs::remove_dir_all(&path) {
                    log::warn!("Rollback could not remove {}: {e}", path.display());
                }
            }
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed && (!self.created_files.is_empty() || !self.created_dirs.is_empty()) {
            log::debug!("Rolling back uncommitted install");
            self.rollback();
        }
    }
}
