//! Validate command implementation

use crate::cli::ValidateArgs;
use crate::domain::AssembledBundle;
use crate::error::Result;
use crate::ui::display::display_report;
use crate::validator;

/// Run validate command; `Ok(false)` when any check failed
pub fn run(args: &ValidateArgs) -> Result<bool> {
    let report = validator::validate(&AssembledBundle::at(&args.bundle));

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        display_report(&report);
    }
    Ok(report.is_ok())
}
