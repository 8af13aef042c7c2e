use clap::Parser;
use std::path::PathBuf;

/// Arguments for the clean command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a bundle after confirming:\n    bundlekit clean --bundle dist/Demo.bundle\n\n\
                  Remove without confirmation:\n    bundlekit clean --bundle dist/Demo.bundle -y")]
pub struct CleanArgs {
    /// Bundle root directory
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
