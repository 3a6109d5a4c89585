use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install from GitHub:\n    cmdpack install owner/review\n    \
                   cmdpack install https://github.com/owner/review.git\n\n\
                   Install a specific version:\n    cmdpack install owner/review@v1.2.0\n    \
                   cmdpack install owner/review --version 3f2a91c\n\n\
                   Install under another name:\n    cmdpack install owner/review --name rv\n\n\
                   Install everything declared in cmdpack.yaml:\n    cmdpack install")]
pub struct InstallArgs {
    /// Repository (owner/repo, URL, or SSH address), optionally with @version.
    /// If not provided, installs every entry of cmdpack.yaml that is not installed yet
    pub repository: Option<String>,

    /// Tag, branch or commit to install (overrides @version)
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Install under this name instead of the one in the command's metadata
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Reinstall even if the command or name already exists
    #[arg(long, short = 'f')]
    pub force: bool,
}
