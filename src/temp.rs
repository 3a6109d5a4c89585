//! Temporary clone directories
//!
//! Clones are made under an absolute temp base so that a relative `TMPDIR`
//! never lands them inside the project being modified.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::Result;

/// Absolute directory under which temporary directories are created
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        return t;
    }

    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}

/// Create a process-private directory for an ephemeral clone
///
/// The directory and everything in it is deleted when the returned guard is
/// dropped, on success and failure paths alike.
pub fn clone_dir() -> Result<TempDir> {
    Ok(tempfile::Builder::new()
        .prefix("cmdpack-clone-")
        .tempdir_in(temp_dir_base())?)
}
