//! Utility functions for configuration files

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{CmdpackError, Result};

/// Deserialize `null` (or a missing key, with `#[serde(default)]`) as the
/// type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize any YAML scalar as a string, so `version: 1.0` reads as "1.0"
pub fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string, found {other:?}"
        ))),
    }
}

/// Read a configuration file, returning `None` when it does not exist
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CmdpackError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Write a file by replacing it atomically
///
/// Content goes to a temporary file in the same directory which is then
/// renamed over the target, so readers never see a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_error = |e: &dyn std::fmt::Display| CmdpackError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| write_error(&e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_error(&e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| write_error(&e))?;
    tmp.persist(path).map_err(|e| write_error(&e.error))?;
    Ok(())
}

/// Map a YAML error to a parse failure for a specific file
pub fn parse_error(path: &Path, err: &serde_yaml::Error) -> CmdpackError {
    CmdpackError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
