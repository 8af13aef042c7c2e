use clap::Parser;
use std::path::PathBuf;

use crate::marker::QUARANTINE_ATTRIBUTE;

/// Arguments for the strip-marker command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Strip the marker from the bundle root:\n    bundlekit strip-marker --bundle dist/Demo.bundle\n\n\
                  Strip every file inside the bundle:\n    bundlekit strip-marker --bundle dist/Demo.bundle --recursive")]
pub struct StripMarkerArgs {
    /// Bundle root directory
    #[arg(long, short = 'b')]
    pub bundle: PathBuf,

    /// Also strip every entry inside the bundle
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Extended attribute to remove
    #[arg(long, default_value = QUARANTINE_ATTRIBUTE)]
    pub attribute: String,
}
