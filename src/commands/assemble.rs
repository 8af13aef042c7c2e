//! Assemble command implementation

use crate::assembler;
use crate::cli::AssembleArgs;
use crate::config;
use crate::error::Result;
use crate::ui::display::display_assembled;

/// Run assemble command
pub fn run(args: AssembleArgs) -> Result<()> {
    let spec = config::load_spec(&args.spec, args.output)?;
    let bundle = assembler::assemble(&spec)?;
    display_assembled(&bundle);
    Ok(())
}
