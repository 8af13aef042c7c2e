//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - assemble: Assemble command arguments
//! - validate: Validate command arguments
//! - strip_marker: Strip-marker command arguments
//! - inspect: Inspect command arguments
//! - clean: Clean command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod assemble;
pub mod clean;
pub mod completions;
pub mod inspect;
pub mod strip_marker;
pub mod validate;

pub use assemble::AssembleArgs;
pub use clean::CleanArgs;
pub use completions::CompletionsArgs;
pub use inspect::InspectArgs;
pub use strip_marker::StripMarkerArgs;
pub use validate::ValidateArgs;

/// Bundlekit - application bundle assembler
///
/// Assemble platform application bundles from a spec, validate their layout
/// and strip the quarantine marker before distribution.
#[derive(Parser, Debug)]
#[command(
    name = "bundlekit",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Assemble, validate and de-quarantine application bundles",
    long_about = "Bundlekit assembles an executable, its resources and a metadata manifest \
                  into a fixed bundle layout, validates assembled bundles and strips the \
                  quarantine marker the OS applies to downloaded files.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  bundlekit assemble --spec bundle.yaml          \x1b[90m# Assemble into dist/\x1b[0m\n   \
                  bundlekit validate --bundle dist/Demo.bundle   \x1b[90m# Check the layout\x1b[0m\n   \
                  bundlekit strip-marker --bundle dist/Demo.bundle -r\n   \
                  bundlekit inspect --bundle dist/Demo.bundle    \x1b[90m# Show manifest and resources\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a bundle from a spec file
    Assemble(AssembleArgs),

    /// Check the structure of an assembled bundle
    Validate(ValidateArgs),

    /// Remove the quarantine extended attribute
    StripMarker(StripMarkerArgs),

    /// Show manifest and resources of a bundle
    Inspect(InspectArgs),

    /// Remove an assembled bundle
    Clean(CleanArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
