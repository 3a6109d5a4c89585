//! Init command implementation

use std::path::PathBuf;

use crate::cli::InitArgs;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::project::Project;
use crate::ui;

use super::helpers::resolve_project_path;

/// Run init command
///
/// The project root is the `--project` directory or the current directory;
/// no upward search happens here.
pub fn run(project: Option<PathBuf>, args: InitArgs) -> Result<()> {
    let root = resolve_project_path(project)?;
    let config = ProjectConfig {
        name: args.name,
        version: args.project_version,
        description: args.description,
        author: args.author,
        ..ProjectConfig::new()
    };

    let path = Project::at(&root).init(&config, args.force)?;
    println!("{} Created {}", ui::ok_style().apply_to("✓"), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CmdpackError;
    use crate::test_fixtures::create_temp_dir;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            name: Some("demo".to_string()),
            description: None,
            author: None,
            project_version: Some("0.1.0".to_string()),
            force,
        }
    }

    #[test]
    fn test_init_creates_config() {
        let temp = create_temp_dir();
        run(Some(temp.path().to_path_buf()), args(false)).unwrap();

        let config = Project::at(temp.path()).load_config().unwrap();
        assert_eq!(config.name.as_deref(), Some("demo"));
        assert_eq!(config.version.as_deref(), Some("0.1.0"));
        assert!(config.commands.is_empty());
    }

    #[test]
    fn test_init_twice_requires_force() {
        let temp = create_temp_dir();
        run(Some(temp.path().to_path_buf()), args(false)).unwrap();

        let err = run(Some(temp.path().to_path_buf()), args(false)).unwrap_err();
        assert!(matches!(err, CmdpackError::ProjectAlreadyInitialized { .. }));
        assert!(run(Some(temp.path().to_path_buf()), args(true)).is_ok());
    }
}
