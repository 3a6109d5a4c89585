//! Info command implementation

use std::path::PathBuf;

use crate::cli::InfoArgs;
use crate::error::Result;
use crate::operations::info::InfoOperation;
use crate::ui;

use super::helpers::open_project;

/// Run info command
pub fn run(project: Option<PathBuf>, args: InfoArgs) -> Result<()> {
    let project = open_project(project)?;
    let info = InfoOperation::new(&project).info(&args.name)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let label = ui::label_style();
    println!("{}", ui::name_style().apply_to(&info.name));

    if let Some(metadata) = &info.metadata {
        println!("  {} {}", label.apply_to("Description:"), metadata.description);
        println!("  {} {}", label.apply_to("Version:"), metadata.version);
        println!("  {} {}", label.apply_to("Author:"), metadata.author);
        println!("  {} {}", label.apply_to("Entry:"), metadata.entry);
        if !metadata.tags.is_empty() {
            println!("  {} {}", label.apply_to("Tags:"), metadata.tags.join(", "));
        }
        if let Some(license) = &metadata.license {
            println!("  {} {license}", label.apply_to("License:"));
        }
    }

    match &info.lock {
        Some(entry) => {
            println!("  {} {}", label.apply_to("Source:"), entry.source);
            println!("  {} {}", label.apply_to("Resolved:"), entry.resolved);
            println!("  {} {}", label.apply_to("Commit:"), entry.commit);
            println!("  {} {}", label.apply_to("Installed:"), entry.installed_at.to_rfc3339());
            println!("  {} {}", label.apply_to("Updated:"), entry.updated_at.to_rfc3339());
        }
        None => println!("  {} not tracked in cmdpack.lock", label.apply_to("Lock:")),
    }

    let status = match &info.broken {
        Some(reason) => ui::error_style().apply_to(format!("broken: {reason}")),
        None => ui::ok_style().apply_to("ok".to_string()),
    };
    println!("  {} {status}", label.apply_to("Status:"));

    Ok(())
}
