//! File system errors

use std::path::Path;

use super::BundleError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> BundleError {
    BundleError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a read failure for `path`
pub fn read_failed(path: &Path, err: &std::io::Error) -> BundleError {
    BundleError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a write failure for `path`
pub fn write_failed(path: &Path, err: &std::io::Error) -> BundleError {
    BundleError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> BundleError {
    BundleError::IoError {
        message: message.into(),
    }
}
