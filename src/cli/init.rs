use clap::Parser;

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create cmdpack.yaml:\n    cmdpack init\n\n\
                  With project metadata:\n    cmdpack init --name my-project --author \"Jane Doe\"\n\n\
                  Overwrite an existing file:\n    cmdpack init --force")]
pub struct InitArgs {
    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Project author
    #[arg(long)]
    pub author: Option<String>,

    /// Project version
    #[arg(long = "version", value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Overwrite an existing cmdpack.yaml
    #[arg(long, short = 'f')]
    pub force: bool,
}
