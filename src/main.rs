//! Bundlekit - application bundle assembler
//!
//! Assembles an executable, its resources and a metadata manifest into a
//! fixed bundle layout, validates assembled bundles and strips the OS
//! quarantine marker from them.

use clap::Parser;
use miette::Diagnostic;

mod assembler;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod hash;
mod logging;
mod manifest;
mod marker;
mod progress;
mod transaction;
mod ui;
mod validator;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::Result;

/// Exit code for a bundle that failed validation
const EXIT_INVALID: i32 = 1;

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Assemble(args) => commands::assemble::run(args).map(|()| 0),
        Commands::Validate(args) => {
            commands::validate::run(&args).map(|ok| if ok { 0 } else { EXIT_INVALID })
        }
        Commands::StripMarker(args) => commands::strip_marker::run(args).map(|()| 0),
        Commands::Inspect(args) => commands::inspect::run(&args).map(|()| 0),
        Commands::Clean(args) => commands::clean::run(&args).map(|()| 0),
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(&args).map(|()| 0),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(help) = e.help() {
                eprintln!("  help: {help}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
