//! Install command implementation

use std::path::PathBuf;

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::git::Git2Client;
use crate::installer::InstallOutcome;
use crate::operations::batch_result;
use crate::operations::install::{InstallOperation, options_from_args};
use crate::ui;

use super::helpers::{open_project, print_failures, print_warning};

/// Run install command
pub fn run(project: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let project = open_project(project)?;
    let git = Git2Client::new();
    let operation = InstallOperation::new(&project, &git);

    let Some(options) = options_from_args(&args) else {
        let pb = ui::spinner("Installing commands from cmdpack.yaml...");
        let report = operation.install_from_config();
        pb.finish_and_clear();
        let report = report?;

        if report.total() == 0 {
            println!("No commands declared in cmdpack.yaml.");
            return Ok(());
        }
        for outcome in &report.installed {
            print_installed(outcome);
        }
        for spec in &report.skipped {
            println!(
                "{} {spec} {}",
                ui::dim_style().apply_to("-"),
                ui::dim_style().apply_to("(already installed)")
            );
        }
        print_failures(&report.failed);
        println!(
            "\n{} installed, {} already installed, {} failed",
            report.installed.len(),
            report.skipped.len(),
            report.failed.len()
        );
        return batch_result("install", &report.failed, report.total());
    };

    let pb = ui::spinner(format!("Installing {}...", options.spec));
    let outcome = operation.install(&options);
    pb.finish_and_clear();
    let outcome = outcome?;

    print_installed(&outcome);
    if let Some(warning) = &outcome.config_warning {
        print_warning(&format!("cmdpack.yaml was not updated: {warning}"));
    }
    Ok(())
}

fn print_installed(outcome: &InstallOutcome) {
    let commit = outcome.commit.as_deref().map(ui::short_commit).unwrap_or("unknown");
    println!(
        "{} Installed {} {} {}",
        ui::ok_style().apply_to("✓"),
        ui::name_style().apply_to(&outcome.name),
        outcome.effective_version,
        ui::dim_style().apply_to(format!("({}, {commit})", outcome.repository))
    );
    if let Some(previous) = &outcome.renamed_from {
        println!("  renamed from {previous}");
    }
}
