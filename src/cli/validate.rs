use clap::Parser;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Validate a bundle:\n    bundlekit validate --bundle dist/Demo.bundle\n\n\
                  Print the report as JSON:\n    bundlekit validate --bundle dist/Demo.bundle --json")]
pub struct ValidateArgs {
    /// Bundle root directory
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
