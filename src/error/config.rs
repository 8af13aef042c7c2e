//! Spec file errors

use super::BundleError;

/// Creates a spec file not found error
pub fn not_found(path: impl Into<String>) -> BundleError {
    BundleError::ConfigNotFound { path: path.into() }
}

/// Creates a spec file parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a spec file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
