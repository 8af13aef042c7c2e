use clap::Parser;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show bundle contents:\n    bundlekit inspect --bundle dist/Demo.bundle\n\n\
                  Print as JSON:\n    bundlekit inspect --bundle dist/Demo.bundle --json")]
pub struct InspectArgs {
    /// Bundle root directory
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}
