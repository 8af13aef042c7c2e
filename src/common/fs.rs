//! Common file system operations with unified error handling

use std::fs;
use std::path::{Path, PathBuf};

use normpath::PathExt;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, fs as fs_err};

/// Mode given to the bundled executable
#[cfg(unix)]
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Whether `path` is a regular file the current platform would run
///
/// On unix this means any execute bit is set; elsewhere any regular file qualifies.
pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Give `path` mode 0755 (no-op off unix)
///
/// Used for the bundled executable and for the bundle root, which is staged
/// in a private temporary directory.
pub fn set_executable_mode(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
            .map_err(|e| fs_err::write_failed(path, &e))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_err::write_failed(parent, &e))?;
    }
    Ok(())
}

/// Copy a single file, creating parent directories as needed
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_parent_dir(target)?;
    fs::copy(source, target)
        .map(|_| ())
        .map_err(|e| fs_err::write_failed(target, &e))
}

/// Entries below `root` with symlinks resolved, in file name order
///
/// Copying and hashing both go through here, so a link contributes its
/// target's content to either. A link back to one of its own ancestors is
/// skipped.
pub fn resolved_entries(root: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) if e.loop_ancestor().is_some() => {
                tracing::debug!(path = ?e.path(), "skipping symlink loop");
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                return Err(fs_err::read_failed(&path, &e.into()));
            }
        }
    }
    Ok(entries)
}

/// Copy a directory recursively, merging into `dst` if it exists
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in resolved_entries(src)? {
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| fs_err::write_failed(&target, &e))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy a file or directory to `target`
pub fn copy_path(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        copy_dir_recursive(source, target)
    } else {
        copy_file(source, target)
    }
}

/// The outermost ancestor of `path` (or `path` itself) that does not exist yet
///
/// Returns `None` when `path` already exists.
pub fn first_missing_ancestor(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return None;
    }
    let mut missing = path.to_path_buf();
    let mut current = path.parent();
    while let Some(parent) = current {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        missing = parent.to_path_buf();
        current = parent.parent();
    }
    Some(missing)
}

/// Normalize `path` even when it does not exist yet
///
/// The longest existing ancestor is made absolute and normalized, then the
/// missing components are appended back, so paths can be compared with
/// `starts_with` before they exist.
pub fn normalize_lenient(path: &Path) -> PathBuf {
    let mut current = path;
    let mut missing = Vec::new();

    while !current.exists() {
        let Some(name) = current.file_name() else {
            return path.to_path_buf();
        };
        missing.push(name);
        current = match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
    }

    let mut result = current
        .normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| current.to_path_buf());
    for name in missing.iter().rev() {
        result.push(name);
    }
    result
}
