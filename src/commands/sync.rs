//! Sync command implementation

use std::path::PathBuf;

use crate::cli::SyncArgs;
use crate::error::Result;
use crate::git::Git2Client;
use crate::operations::batch_result;
use crate::operations::sync::{SyncOperation, SyncPlan};
use crate::ui;

use super::helpers::{open_project, print_failures};

/// Run sync command
pub fn run(project: Option<PathBuf>, args: SyncArgs) -> Result<()> {
    let project = open_project(project)?;
    let git = Git2Client::new();
    let operation = SyncOperation::new(&project, &git);

    let plan = operation.analyze()?;
    if plan.in_sync() {
        println!("{} Already in sync.", ui::ok_style().apply_to("✓"));
        return Ok(());
    }

    if args.dry_run {
        print_plan(&plan);
        return Ok(());
    }

    let pb = ui::spinner("Syncing commands...");
    let report = operation.execute(&plan);
    pb.finish_and_clear();

    for outcome in &report.installed {
        println!(
            "{} Installed {}",
            ui::ok_style().apply_to("+"),
            ui::name_style().apply_to(&outcome.name)
        );
    }
    for name in &report.removed {
        println!(
            "{} Removed {}",
            ui::error_style().apply_to("-"),
            ui::name_style().apply_to(name)
        );
    }
    print_failures(&report.failed);
    println!(
        "\n{} installed, {} removed, {} failed",
        report.installed.len(),
        report.removed.len(),
        report.failed.len()
    );

    batch_result("sync", &report.failed, report.total())
}

fn print_plan(plan: &SyncPlan) {
    println!("Would install:");
    if plan.to_install.is_empty() {
        println!("  (nothing)");
    }
    for spec in &plan.to_install {
        println!("  {} {spec}", ui::ok_style().apply_to("+"));
    }

    println!("Would remove:");
    if plan.to_remove.is_empty() {
        println!("  (nothing)");
    }
    for name in &plan.to_remove {
        println!("  {} {name}", ui::error_style().apply_to("-"));
    }
}
