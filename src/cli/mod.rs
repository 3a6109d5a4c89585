//! CLI definitions using clap derive API
//!
//! One submodule per command's argument types.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod info;
pub mod init;
pub mod install;
pub mod list;
pub mod remove;
pub mod sync;
pub mod update;

pub use completions::CompletionsArgs;
pub use info::InfoArgs;
pub use init::InitArgs;
pub use install::InstallArgs;
pub use list::ListArgs;
pub use remove::RemoveArgs;
pub use sync::SyncArgs;
pub use update::UpdateArgs;

/// cmdpack - slash-command package manager
///
/// Install, update and remove command bundles fetched from git repositories.
#[derive(Parser, Debug)]
#[command(
    name = "cmdpack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package manager for slash-command bundles",
    long_about = "cmdpack installs command bundles from git repositories into .claude/commands, \
                  records what was installed in cmdpack.lock and keeps the project in line \
                  with the commands declared in cmdpack.yaml.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  cmdpack init                          \x1b[90m# Create cmdpack.yaml\x1b[0m\n   \
                  cmdpack install owner/review          \x1b[90m# Install from GitHub shorthand\x1b[0m\n   \
                  cmdpack install owner/review@v1.2.0   \x1b[90m# Install a specific tag\x1b[0m\n   \
                  cmdpack update --all                  \x1b[90m# Update every command\x1b[0m\n   \
                  cmdpack sync                          \x1b[90m# Match cmdpack.yaml exactly\x1b[0m\n   \
                  cmdpack list                          \x1b[90m# List installed commands\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to the nearest project above the current directory)
    #[arg(long, short = 'p', global = true, env = "CMDPACK_PROJECT")]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create cmdpack.yaml in the project directory
    Init(InitArgs),

    /// Install a command, or every command declared in cmdpack.yaml
    Install(InstallArgs),

    /// Update installed commands
    Update(UpdateArgs),

    /// Remove an installed command
    Remove(RemoveArgs),

    /// Install and remove commands to match cmdpack.yaml
    Sync(SyncArgs),

    /// List installed commands
    List(ListArgs),

    /// Show command information
    Info(InfoArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
