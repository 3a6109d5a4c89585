//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::error::{CmdpackError, Result};
use crate::operations::ItemFailure;
use crate::project::Project;
use crate::ui;

/// Resolve the directory given by `--project`, or the current directory
pub fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| CmdpackError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Open the project containing `project` (or the current directory)
pub fn open_project(project: Option<PathBuf>) -> Result<Project> {
    let start = resolve_project_path(project)?;
    Project::discover(Some(Path::new(&start)))
}

/// Print one line per failed item of a bulk operation
pub fn print_failures(failures: &[ItemFailure]) {
    for failure in failures {
        eprintln!(
            "  {} {}: {}",
            ui::error_style().apply_to("✗"),
            failure.item,
            failure.error.summary()
        );
    }
}

/// Print a warning the user should act on
pub fn print_warning(message: &str) {
    eprintln!("{} {message}", ui::warn_style().apply_to("warning:"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_resolve_project_path_explicit() {
        let path = resolve_project_path(Some(PathBuf::from("/tmp/p"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/p"));
    }

    #[test]
    fn test_open_project_missing_directory() {
        let temp = create_temp_dir();
        let err = open_project(Some(temp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, CmdpackError::ProjectNotFound { .. }));
    }
}
