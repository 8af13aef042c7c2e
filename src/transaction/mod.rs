//! Transaction support for all-or-nothing bundle output
//!
//! Assembly swaps a freshly staged bundle into place. A transaction records
//! what it created and what it moved aside, so that a failure part-way leaves
//! the target root exactly as it was.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! transaction.displace(&bundle_root)?;
//!
//! // Perform operations...
//! transaction.track_dir_created(&bundle_root);
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```


use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_err};

/// A path moved aside so it can be restored on rollback
#[derive(Debug, Clone)]
struct Displaced {
    /// Where the entry lived
    original: PathBuf,
    /// Where it is parked until commit
    parked: PathBuf,
}

/// A transaction for atomic changes below a target root
#[derive(Debug, Default)]
pub struct Transaction {
    /// Directory trees created during this transaction
    created_dirs: Vec<PathBuf>,

    /// Entries moved aside during this transaction
    displaced: Vec<Displaced>,

    /// Whether the transaction has been committed
    committed: bool,
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    if path.is_dir() && !path.is_symlink() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a directory tree that did not exist before this transaction
    ///
    /// The whole tree is removed on rollback.
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.push(path.into());
    }

    /// Move `path` aside; it is deleted on commit and restored on rollback
    ///
    /// Does nothing when `path` does not exist.
    pub fn displace(&mut self, path: &Path) -> Result<()> {
        if fs::symlink_metadata(path).is_err() {
            return Ok(());
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parked = path.with_file_name(format!(".{name}.displaced-{}", std::process::id()));

        if fs::symlink_metadata(&parked).is_ok() {
            remove_entry(&parked).map_err(|e| fs_err::write_failed(&parked, &e))?;
        }
        fs::rename(path, &parked).map_err(|e| fs_err::write_failed(path, &e))?;
        tracing::debug!(from = %path.display(), to = %parked.display(), "displaced existing entry");

        self.displaced.push(Displaced {
            original: path.to_path_buf(),
            parked,
        });
        Ok(())
    }

    /// Commit the transaction: keep new content, drop displaced entries
    pub fn commit(mut self) {
        self.committed = true;
        for entry in &self.displaced {
            if let Err(e) = remove_entry(&entry.parked) {
                tracing::warn!(
                    path = %entry.parked.display(),
                    error = %e,
                    "failed to remove displaced entry"
                );
            }
        }
    }

    /// Manually trigger a rollback
    pub fn rollback(&mut self) -> Result<()> {
        if self.committed {
            return Ok(());
        }

        // Deepest trees first so nested tracking does not fail on a parent
        let mut dirs: Vec<_> = self.created_dirs.iter().collect();
        dirs.sort_by_key(|p| std::cmp::Reverse(p.components().count()));
        for path in dirs {
            if path.is_dir() {
                if let Err(e) = fs::remove_dir_all(path) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove created directory");
                }
            }
        }

        for entry in self.displaced.iter().rev() {
            if let Some(parent) = entry.original.parent() {
                let _ = fs::create_dir_all(parent);
            }
            fs::rename(&entry.parked, &entry.original)
                .map_err(|e| fs_err::write_failed(&entry.original, &e))?;
            tracing::debug!(path = %entry.original.display(), "restored displaced entry");
        }
        self.displaced.clear();

        Ok(())
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            tracing::debug!("rolling back uncommitted transaction");
            if let Err(e) = self.rollback() {
                tracing::warn!(error = %e, "rollback failed");
            }
        }
    }
}
