//! Install operation
//!
//! Installs a single repository, or, without one, every desired entry whose
//! repository is not installed yet.

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::git::GitClient;
use crate::installer::{InstallOptions, InstallOutcome, Installer};
use crate::operations::ItemFailure;
use crate::project::Project;
use crate::source::CommandSpec;

/// Options for a single install, or `None` for a bulk install
///
/// `--version` takes precedence over a version embedded in the repository.
pub fn options_from_args(args: &InstallArgs) -> Option<InstallOptions> {
    let repository = args.repository.as_deref()?;
    let mut spec = CommandSpec::parse(repository);
    if args.version.is_some() {
        spec = spec.with_version(args.version.clone());
    }
    Some(
        InstallOptions::new(spec)
            .with_name(args.name.clone())
            .with_force(args.force),
    )
}

/// Result of installing from the desired-state file
#[derive(Debug, Default)]
pub struct BulkInstallReport {
    pub installed: Vec<InstallOutcome>,

    /// Desired entries whose repository was already installed
    pub skipped: Vec<String>,

    pub failed: Vec<ItemFailure>,
}

impl BulkInstallReport {
    pub fn total(&self) -> usize {
        self.installed.len() + self.skipped.len() + self.failed.len()
    }
}

/// High-level install operation
pub struct InstallOperation<'a> {
    project: &'a Project,
    git: &'a dyn GitClient,
}

impl<'a> InstallOperation<'a> {
    pub fn new(project: &'a Project, git: &'a dyn GitClient) -> Self {
        Self { project, git }
    }

    /// Install one command
    pub fn install(&self, options: &InstallOptions) -> Result<InstallOutcome> {
        Installer::new(self.project, self.git).install(options)
    }

    /// Install every desired entry that is not installed yet
    ///
    /// Entries are processed in declaration order. A failing entry is
    /// recorded and the rest still run.
    pub fn install_from_config(&self) -> Result<BulkInstallReport> {
        let config = self.project.load_config()?;
        let mut report = BulkInstallReport::default();

        for spec in config.entries() {
            let lockfile = self.project.load_lockfile()?;
            if let Some(entry) = lockfile.find_by_repository(&spec.repository) {
                log::debug!("{spec} already installed as '{}'", entry.name);
                report.skipped.push(spec.to_string());
                continue;
            }

            let options = InstallOptions::new(spec.clone()).with_save(false);
            match self.install(&options) {
                Ok(outcome) => report.installed.push(outcome),
                Err(e) => {
                    log::debug!("Installing {spec} failed: {e}");
                    report.failed.push(ItemFailure::new(spec.to_string(), e));
                }
            }
        }

        Ok(report)
    }
}
