//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{CmdpackError, Result};

/// Options for [`copy_dir_recursive`]
#[derive(Debug, Default, Clone)]
pub struct CopyOptions {
    /// File or directory names skipped at any depth
    pub exclude: Vec<String>,
}

impl CopyOptions {
    pub fn exclude_git() -> Self {
        Self {
            exclude: vec![".git".to_string()],
        }
    }

    fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        self.exclude.iter().any(|excluded| name.to_str() == Some(excluded.as_str()))
    }
}

/// Copy a directory tree into `dst`, creating it if needed
pub fn copy_dir_recursive(src: &Path, dst: &Path, options: &CopyOptions) -> Result<()> {
    let walker = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !options.is_excluded(entry.file_name()));

    fs::create_dir_all(dst).map_err(|e| write_failed(dst, &e))?;

    for entry in walker {
        let entry = entry.map_err(|e| CmdpackError::FileReadFailed {
            path: src.display().to_string(),
            reason: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| CmdpackError::IoError {
                message: e.to_string(),
            })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| write_failed(&target, &e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| write_failed(&target, &e))?;
        }
    }

    Ok(())
}

/// Remove a directory tree if it exists
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| CmdpackError::FileRemoveFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}

/// Remove a file if it exists
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| CmdpackError::FileRemoveFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(true)
}

fn write_failed(path: &Path, err: &std::io::Error) -> CmdpackError {
    CmdpackError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
