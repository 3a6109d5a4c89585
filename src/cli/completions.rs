use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    cmdpack completions --shell bash > ~/.bash_completion.d/cmdpack\n\n\
                  Generate zsh completions:\n    cmdpack completions --shell zsh > ~/.zfunc/_cmdpack\n\n\
                  Generate fish completions:\n    cmdpack completions --shell fish > ~/.config/fish/completions/cmdpack.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, short = 's', value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use super::*;

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["cmdpack", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parsing_completions_unknown_shell() {
        assert!(Cli::try_parse_from(["cmdpack", "completions", "--shell", "tcsh"]).is_err());
    }
}
