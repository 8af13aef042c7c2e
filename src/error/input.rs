//! Caller-correctable input errors raised while checking a bundle spec

use std::path::Path;

use super::BundleError;

/// Creates a missing source error
pub fn missing_source(path: &Path) -> BundleError {
    BundleError::MissingSource {
        path: path.display().to_string(),
    }
}

/// Creates a not executable error
pub fn not_executable(path: &Path) -> BundleError {
    BundleError::NotExecutable {
        path: path.display().to_string(),
    }
}

/// Creates a missing metadata key error
pub fn missing_metadata_key(key: impl Into<String>) -> BundleError {
    BundleError::MissingMetadataKey { key: key.into() }
}

/// Creates an invalid destination error
pub fn invalid_destination(destination: impl Into<String>, reason: impl Into<String>) -> BundleError {
    BundleError::InvalidDestination {
        destination: destination.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid name error
pub fn invalid_name(field: impl Into<String>, value: impl Into<String>) -> BundleError {
    BundleError::InvalidName {
        field: field.into(),
        value: value.into(),
    }
}

/// Creates a destination conflict error
pub fn destination_conflict(destination: impl Into<String>, first: &Path, second: &Path) -> BundleError {
    BundleError::DestinationConflict {
        destination: destination.into(),
        first: first.display().to_string(),
        second: second.display().to_string(),
    }
}
