//! BLAKE3 content hashing for resource conflict detection and the resource record

use std::fs::File;
use std::io;
use std::path::Path;

use blake3::Hasher;

use crate::common::fs::resolved_entries;
use crate::error::{Result, fs as fs_err};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

fn feed_file(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| fs_err::read_failed(path, &e))?;
    io::copy(&mut file, hasher)
        .map(|_| ())
        .map_err(|e| fs_err::read_failed(path, &e))
}

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    feed_file(&mut hasher, path)?;
    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Hash every file below `path` in sorted order
///
/// Each file is preceded by its forward-slash relative path, so the hash is
/// the same on every platform and changes when a file is renamed. Symlinks
/// count as the content they point at.
pub fn hash_directory(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(fs_err::not_found(path));
    }

    let mut files: Vec<_> = resolved_entries(path)?
        .into_iter()
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();

    let mut hasher = Hasher::new();
    for file_path in files {
        let relative = file_path
            .strip_prefix(path)
            .unwrap_or(&file_path)
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative.as_bytes());
        hasher.update(b"\0");
        feed_file(&mut hasher, &file_path)?;
        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Hash a file or a directory, whichever `path` is
pub fn hash_path(path: &Path) -> Result<String> {
    if path.is_dir() {
        hash_directory(path)
    } else {
        hash_file(path)
    }
}

/// Verify a hash matches the expected value, tolerating a missing prefix
pub fn verify_hash(expected: &str, actual: &str) -> bool {
    let strip = |h: &str| h.strip_prefix(HASH_PREFIX).unwrap_or(h).to_string();
    strip(expected) == strip(actual)
}
