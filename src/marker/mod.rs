//! Quarantine marker removal
//!
//! Downloaded bundles carry an extended attribute that makes the OS treat
//! them as unverified. Stripping it is idempotent: an absent attribute is
//! not an error, and neither is a file system that cannot carry it.
//!
//! Extended attributes are only available on Linux and macOS. Elsewhere
//! [`strip_quarantine_marker`] fails with `MarkerNotSupported`.
//! A missing path is not an error: there is no marker to remove.


use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{BundleError, Result, fs as fs_err};

/// Attribute the OS applies to downloaded files
pub const QUARANTINE_ATTRIBUTE: &str = "com.apple.quarantine";

/// Options for [`strip_quarantine_marker`]
#[derive(Debug, Clone)]
pub struct StripOptions {
    /// Extended attribute name to remove
    pub attribute: String,
    /// Also strip every entry below the root
    pub recursive: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            attribute: QUARANTINE_ATTRIBUTE.to_string(),
            recursive: false,
        }
    }
}

/// Whether this target can remove extended attributes at all
const SUPPORTED: bool =
    cfg!(any(target_os = "linux", target_os = "macos")) && xattr::SUPPORTED_PLATFORM;

/// Remove the marker from `path`, returning how many entries carried it
///
/// A path that does not exist carries no marker: nothing is removed.
pub fn strip_quarantine_marker(path: &Path, options: &StripOptions) -> Result<usize> {
    if !SUPPORTED {
        return Err(BundleError::MarkerNotSupported {
            platform: std::env::consts::OS.to_string(),
        });
    }
    if std::fs::symlink_metadata(path).is_err() {
        tracing::warn!(path = %path.display(), "nothing to strip, path does not exist");
        return Ok(0);
    }

    let mut removed = 0;
    if options.recursive {
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| fs_err::io_error(e.to_string()))?;
            removed += usize::from(strip_one(entry.path(), &options.attribute)?);
        }
    } else {
        removed += usize::from(strip_one(path, &options.attribute)?);
    }

    tracing::debug!(
        path = %path.display(),
        attribute = %options.attribute,
        removed,
        "stripped quarantine marker"
    );
    Ok(removed)
}

/// `true` when the attribute was present and removed
///
/// `xattr::remove` acts on a symlink itself, never on its target.
fn strip_one(path: &Path, attribute: &str) -> Result<bool> {
    match xattr::remove(path, attribute) {
        Ok(()) => Ok(true),
        Err(e) if is_absent(&e, path) => Ok(false),
        Err(e) => Err(fs_err::write_failed(path, &e)),
    }
}

#[cfg(target_os = "linux")]
const NO_ATTRIBUTE: i32 = libc::ENODATA;
#[cfg(target_os = "macos")]
const NO_ATTRIBUTE: i32 = libc::ENOATTR;

/// Errors meaning the attribute is not there to remove
///
/// A file system that rejects the namespace cannot carry the marker.
/// Linux refuses user attributes on symlinks with `EPERM`.
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn is_absent(err: &io::Error, path: &Path) -> bool {
    let Some(code) = err.raw_os_error() else {
        return false;
    };
    code == NO_ATTRIBUTE
        || code == libc::ENOTSUP
        || code == libc::EOPNOTSUPP
        || (code == libc::EPERM && path.is_symlink())
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn is_absent(_err: &io::Error, _path: &Path) -> bool {
    false
}
