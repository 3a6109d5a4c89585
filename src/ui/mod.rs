//! Terminal presentation helpers shared by the commands
//!
//! Spinners are drawn on stderr and hidden when stderr is not a terminal,
//! so piped output and tests stay clean.

use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner showing `message`
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS);
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Ask a yes/no question
pub fn confirm(message: &str, default: bool) -> Result<bool> {
    Ok(inquire::Confirm::new(message)
        .with_default(default)
        .prompt()?)
}

pub fn name_style() -> Style {
    Style::new().bold().yellow()
}

pub fn label_style() -> Style {
    Style::new().bold()
}

pub fn ok_style() -> Style {
    Style::new().green()
}

pub fn warn_style() -> Style {
    Style::new().yellow()
}

pub fn error_style() -> Style {
    Style::new().red()
}

pub fn dim_style() -> Style {
    Style::new().dim()
}

/// First seven characters of a commit hash
pub fn short_commit(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}
