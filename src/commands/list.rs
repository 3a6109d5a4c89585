//! List command implementation
//!
//! Lists every installed command with its version and source. Broken
//! commands are shown with the reason instead of being left out.

use std::path::PathBuf;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::operations::list::{CommandListing, ListOperation};
use crate::ui;

use super::helpers::open_project;

/// Run list command
pub fn run(project: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let project = open_project(project)?;
    let listing = ListOperation::new(&project).list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("No commands installed.");
        return Ok(());
    }

    println!("Installed commands ({}):", listing.len());
    println!();
    for command in &listing {
        print_command(command, args.long);
    }

    Ok(())
}

fn print_command(command: &CommandListing, long: bool) {
    let version = command.version().unwrap_or("?");
    let mut line = format!("  {} {version}", ui::name_style().apply_to(&command.name));
    if !command.tracked {
        line.push_str(&format!(" {}", ui::warn_style().apply_to("(untracked)")));
    }
    if let Some(reason) = &command.broken {
        line.push_str(&format!(" {}", ui::error_style().apply_to(format!("[broken: {reason}]"))));
    }
    println!("{line}");

    if let Some(description) = command.metadata.as_ref().map(|m| &m.description) {
        if !description.is_empty() {
            println!("    {}", ui::dim_style().apply_to(description));
        }
    }

    if long {
        if let Some(repository) = command.repository() {
            println!("    {} {repository}", ui::label_style().apply_to("Source:"));
        }
        if let Some(entry) = &command.lock {
            let pinned = if entry.is_pinned() { " (pinned)" } else { "" };
            println!(
                "    {} {}{pinned}",
                ui::label_style().apply_to("Resolved:"),
                entry.resolved
            );
            let commit = if entry.has_commit() {
                ui::short_commit(&entry.commit)
            } else {
                "unknown"
            };
            println!("    {} {commit}", ui::label_style().apply_to("Commit:"));
            println!(
                "    {} {}",
                ui::label_style().apply_to("Updated:"),
                entry.updated_at.to_rfc3339()
            );
        }
    }
}
