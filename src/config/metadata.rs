//! Command metadata (cmdpack.yaml inside a command repository)
//!
//! ```yaml
//! name: review
//! version: 1.2.0
//! description: Review the staged diff
//! author: Jane Doe
//! repository: https://github.com/owner/review
//! entry: index.md
//! tags: [git, review]
//! license: MIT
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::utils::{null_as_default, read_optional, scalar_as_string, write_atomic};
use crate::error::{CmdpackError, Result};

/// Metadata filename inside each command directory
pub const METADATA_FILE: &str = "cmdpack.yaml";

/// Metadata embedded in each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "scalar_as_string")]
    pub version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub repository: String,

    /// Entry-point document, relative to the command directory
    #[serde(default)]
    pub entry: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl CommandMetadata {
    /// Path of the metadata file in `dir`
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(METADATA_FILE)
    }

    /// Parse and validate metadata from a YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, String> {
        let metadata: Self = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Load and validate the metadata file in `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        let invalid = |reason: String| CmdpackError::MetadataInvalid {
            path: path.display().to_string(),
            reason,
        };

        let content = read_optional(&path)?
            .ok_or_else(|| invalid(format!("{METADATA_FILE} not found")))?;
        Self::from_yaml(&content).map_err(invalid)
    }

    /// Write the metadata file into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        write_atomic(&Self::path_in(dir), &yaml)
    }

    /// Check that every required field is present and the entry stays
    /// inside the command directory
    pub fn validate(&self) -> std::result::Result<(), String> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("version", &self.version),
            ("description", &self.description),
            ("author", &self.author),
            ("repository", &self.repository),
            ("entry", &self.entry),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(format!("missing required fields: {}", missing.join(", ")));
        }

        let entry = Path::new(&self.entry);
        if entry.is_absolute()
            || entry
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(format!("entry '{}' must be a relative path inside the command", self.entry));
        }

        Ok(())
    }

    /// Path of the entry document in `dir`
    pub fn entry_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.entry)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn sample_yaml(name: &str, version: &str) -> String {
        format!(
            "name: {name}\nversion: {version}\ndescription: Test command\nauthor: Tester\n\
             repository: https://github.com/owner/{name}\nentry: index.md\ntags: [test]\n"
        )
    }

    #[test]
    fn test_parse_valid_metadata() {
        let metadata = CommandMetadata::from_yaml(&sample_yaml("review", "1.2.0")).unwrap();
        assert_eq!(metadata.name, "review");
        assert_eq!(metadata.version, "1.2.0");
        assert_eq!(metadata.tags, vec!["test"]);
        assert_eq!(metadata.license, None);
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let err = CommandMetadata::from_yaml("name: review\nversion: ''\n").unwrap_err();
        assert!(err.contains("version"));
        assert!(err.contains("description"));
        assert!(err.contains("entry"));
        assert!(!err.contains("name,"));
    }

    #[test]
    fn test_entry_outside_directory_rejected() {
        let yaml = sample_yaml("review", "1.0.0").replace("entry: index.md", "entry: ../secret.md");
        assert!(CommandMetadata::from_yaml(&yaml).is_err());
    }

    #[test]
    fn test_numeric_version_accepted() {
        let yaml = sample_yaml("review", "1.0");
        assert_eq!(CommandMetadata::from_yaml(&yaml).unwrap().version, "1.0");
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(CommandMetadata::from_yaml("name: [unclosed").is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = CommandMetadata::load(temp.path()).unwrap_err();
        assert!(matches!(err, CmdpackError::MetadataInvalid { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut metadata = CommandMetadata::from_yaml(&sample_yaml("review", "1.0.0")).unwrap();
        metadata.homepage = Some("https://example.com".to_string());
        metadata.save(temp.path()).unwrap();

        assert_eq!(CommandMetadata::load(temp.path()).unwrap(), metadata);
    }
}
