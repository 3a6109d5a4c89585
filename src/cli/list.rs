use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show repository, resolved version and commit
    #[arg(long, short = 'l')]
    pub long: bool,

    /// Print JSON instead of a table
    #[arg(long, conflicts_with = "long")]
    pub json: bool,
}
