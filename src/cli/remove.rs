use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a command:\n    cmdpack remove review\n\n\
                  Remove without confirmation:\n    cmdpack remove review -y\n\n\
                  Keep the entry in cmdpack.yaml:\n    cmdpack remove review --no-save")]
pub struct RemoveArgs {
    /// Installed command to remove
    pub name: String,

    /// Keep the repository in cmdpack.yaml
    #[arg(long)]
    pub no_save: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
