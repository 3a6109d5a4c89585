//! Update command implementation

use std::path::PathBuf;

use crate::cli::UpdateArgs;
use crate::error::Result;
use crate::git::Git2Client;
use crate::operations::batch_result;
use crate::operations::update::{UpdateDecision, UpdateOperation, UpdateOptions};
use crate::ui;

use super::helpers::{open_project, print_failures};

/// Run update command
pub fn run(project: Option<PathBuf>, args: UpdateArgs) -> Result<()> {
    let project = open_project(project)?;
    let git = Git2Client::new();
    let operation = UpdateOperation::new(&project, &git);

    let pb = ui::spinner("Checking for updates...");
    let decisions = operation.plan(&UpdateOptions::from(&args));
    pb.finish_and_clear();
    let decisions = decisions?;

    if decisions.is_empty() {
        println!("No commands installed.");
        return Ok(());
    }

    if args.check {
        for decision in &decisions {
            print_decision(decision);
        }
        let available = decisions.iter().filter(|d| d.needs_update).count();
        let pinned = decisions.iter().filter(|d| d.is_pinned()).count();
        println!(
            "\n{available} of {} commands can be updated, {pinned} pinned",
            decisions.len()
        );
        return Ok(());
    }

    let interactive = args.interactive;
    let report = operation.execute(decisions, |decision| {
        if !interactive {
            return Ok(true);
        }
        ui::confirm(
            &format!("Update {} ({})?", decision.name, decision.reason),
            true,
        )
    })?;

    for outcome in &report.updated {
        println!(
            "{} Updated {} to {}",
            ui::ok_style().apply_to("✓"),
            ui::name_style().apply_to(&outcome.name),
            outcome.effective_version
        );
    }
    for decision in &report.skipped {
        println!(
            "{} {} {}",
            ui::dim_style().apply_to("-"),
            decision.name,
            ui::dim_style().apply_to(format!("({})", decision.reason))
        );
    }
    print_failures(&report.failed);
    let declined = report.declined();
    let declined = if declined > 0 {
        format!(", {declined} declined")
    } else {
        String::new()
    };
    println!(
        "\n{} updated, {} up to date, {} pinned{declined}, {} failed",
        report.updated.len(),
        report.up_to_date(),
        report.pinned(),
        report.failed.len()
    );

    batch_result("update", &report.failed, report.total())
}

fn print_decision(decision: &UpdateDecision) {
    let marker = if decision.needs_update {
        ui::warn_style().apply_to("↑")
    } else {
        ui::ok_style().apply_to("✓")
    };
    println!(
        "{marker} {} {}",
        ui::name_style().apply_to(&decision.name),
        ui::dim_style().apply_to(format!("({})", decision.reason))
    );
}
