//! cmdpack - slash-command package manager
//!
//! Installs command bundles from git repositories into a project's
//! `.claude/commands` directory, records them in `cmdpack.lock` and keeps
//! them in line with the commands declared in `cmdpack.yaml`.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod git;
mod installer;
mod operations;
mod project;
mod resolver;
mod source;
mod temp;
mod transaction;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Set up `env_logger`; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(cli.project, args),
        Commands::Install(args) => commands::install::run(cli.project, args),
        Commands::Update(args) => commands::update::run(cli.project, args),
        Commands::Remove(args) => commands::remove::run(cli.project, args),
        Commands::Sync(args) => commands::sync::run(cli.project, args),
        Commands::List(args) => commands::list::run(cli.project, args),
        Commands::Info(args) => commands::info::run(cli.project, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  help: {help}");
        }
        std::process::exit(1);
    }
}
