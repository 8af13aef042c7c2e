use clap::Parser;
use std::path::PathBuf;

/// Arguments for the assemble command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Assemble from a spec file:\n    bundlekit assemble --spec bundle.yaml\n\n\
                  Assemble into another directory:\n    bundlekit assemble --spec bundle.yaml --output /tmp/out\n\n\
                  Take the spec path from the environment:\n    BUNDLEKIT_SPEC=bundle.yaml bundlekit assemble")]
pub struct AssembleArgs {
    /// Bundle spec file (YAML)
    #[arg(long, short = 's', env = "BUNDLEKIT_SPEC")]
    pub spec: PathBuf,

    /// Target root directory, overriding `output` in the spec
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
