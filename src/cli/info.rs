use clap::Parser;

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Installed command name
    pub name: String,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}
