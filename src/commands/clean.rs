//! Clean command implementation

use std::fs;
use std::path::{Path, PathBuf};

use console::Style;
use inquire::Confirm;

use crate::cli::CleanArgs;
use crate::domain::BundleLayout;
use crate::domain::bundle::BUNDLE_EXTENSION;
use crate::error::{BundleError, Result, fs as fs_err};

/// Resolve `path` to a bundle root that is safe to delete
fn resolve_bundle(path: &Path) -> Result<PathBuf> {
    let root = dunce::canonicalize(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            fs_err::not_found(path)
        } else {
            fs_err::read_failed(path, &e)
        }
    })?;

    let has_extension = root
        .extension()
        .is_some_and(|ext| ext == BUNDLE_EXTENSION);
    if !has_extension || !BundleLayout::new(&root).looks_like_bundle() {
        return Err(BundleError::NotABundle {
            path: path.display().to_string(),
        });
    }
    Ok(root)
}

fn confirm_removal(root: &Path) -> Result<bool> {
    if !console::user_attended() {
        return Err(BundleError::IoError {
            message: "Refusing to remove without confirmation; pass --yes".to_string(),
        });
    }

    Confirm::new(&format!("Remove {}?", root.display()))
        .with_default(false)
        .with_help_message("Press 'y' to remove, Enter to cancel")
        .prompt()
        .map_err(|e| BundleError::IoError {
            message: format!("Failed to read confirmation: {e}"),
        })
}

/// Run clean command
pub fn run(args: &CleanArgs) -> Result<()> {
    let root = resolve_bundle(&args.bundle)?;

    if !args.yes && !confirm_removal(&root)? {
        println!("Cancelled.");
        return Ok(());
    }

    fs::remove_dir_all(&root).map_err(|e| fs_err::write_failed(&root, &e))?;
    tracing::debug!(path = %root.display(), "removed bundle");
    println!(
        "{} {}",
        Style::new().green().bold().apply_to("Removed"),
        root.display()
    );
    Ok(())
}
