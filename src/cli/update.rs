use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Update one command:\n    cmdpack update review\n\n\
                  Update everything:\n    cmdpack update --all\n\n\
                  Only report what would change:\n    cmdpack update --all --check\n\n\
                  Ask before each update:\n    cmdpack update --all --interactive")]
pub struct UpdateArgs {
    /// Installed command to update
    #[arg(conflicts_with = "all")]
    pub name: Option<String>,

    /// Update every installed command
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Report available updates without installing them
    #[arg(long)]
    pub check: bool,

    /// Reinstall even when the command is up to date or pinned
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Confirm each update
    #[arg(long, short = 'i', conflicts_with = "check")]
    pub interactive: bool,
}
