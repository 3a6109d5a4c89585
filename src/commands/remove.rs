//! Remove command implementation

use std::path::PathBuf;

use crate::cli::RemoveArgs;
use crate::error::Result;
use crate::operations::remove::{RemoveOperation, RemoveOptions};
use crate::ui;

use super::helpers::{open_project, print_warning};

/// Run remove command
pub fn run(project: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let project = open_project(project)?;

    if !args.yes && !ui::confirm(&format!("Remove command '{}'?", args.name), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    let outcome = RemoveOperation::new(&project).execute(&RemoveOptions::from(&args))?;

    println!(
        "{} Removed {}",
        ui::ok_style().apply_to("✓"),
        ui::name_style().apply_to(&outcome.name)
    );
    if outcome.config_updated {
        println!("  removed from cmdpack.yaml");
    }
    if let Some(warning) = &outcome.config_warning {
        print_warning(&format!("cmdpack.yaml was not updated: {warning}"));
    }
    Ok(())
}
