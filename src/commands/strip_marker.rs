//! Strip-marker command implementation

use console::Style;

use crate::cli::StripMarkerArgs;
use crate::error::Result;
use crate::marker::{self, StripOptions};

/// Run strip-marker command
pub fn run(args: StripMarkerArgs) -> Result<()> {
    let options = StripOptions {
        attribute: args.attribute,
        recursive: args.recursive,
    };
    let removed = marker::strip_quarantine_marker(&args.bundle, &options)?;

    if removed == 0 {
        println!(
            "No {} attribute on {}",
            options.attribute,
            args.bundle.display()
        );
    } else {
        println!(
            "{} {} from {removed} entr{} in {}",
            Style::new().green().bold().apply_to("Removed"),
            options.attribute,
            if removed == 1 { "y" } else { "ies" },
            args.bundle.display()
        );
    }
    Ok(())
}
