use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install and remove commands to match cmdpack.yaml:\n    cmdpack sync\n\n\
                  Show the plan only:\n    cmdpack sync --dry-run")]
pub struct SyncArgs {
    /// Show what would be installed and removed without doing it
    #[arg(long)]
    pub dry_run: bool,
}
