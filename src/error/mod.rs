//! Error types and handling for bundlekit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`input`]: Bundle spec errors the caller can correct
//! - [`config`]: Spec file errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod input;


use miette::Diagnostic;
use thiserror::Error;

/// Exit code for caller-correctable input errors
pub const EXIT_INPUT: i32 = 2;
/// Exit code for conflicting resource mappings
pub const EXIT_CONFLICT: i32 = 3;
/// Exit code when the platform has no extended attributes
pub const EXIT_UNSUPPORTED: i32 = 4;

/// Main error type for bundlekit operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundleError {
    // Input errors
    #[error("Source not found: {path}")]
    #[diagnostic(
        code(bundlekit::input::missing_source),
        help("Check that the path exists relative to the spec file")
    )]
    MissingSource { path: String },

    #[error("Executable lacks execute permission: {path}")]
    #[diagnostic(
        code(bundlekit::input::not_executable),
        help("Run 'chmod +x' on the executable before assembling")
    )]
    NotExecutable { path: String },

    #[error("Required metadata key '{key}' is missing or empty")]
    #[diagnostic(
        code(bundlekit::input::missing_metadata_key),
        help("Required keys: bundle_name, executable_name, version, identifier")
    )]
    MissingMetadataKey { key: String },

    #[error("Invalid resource destination '{destination}': {reason}")]
    #[diagnostic(
        code(bundlekit::input::invalid_destination),
        help("Destinations are relative paths inside Resources/, e.g. Resources/icon.png")
    )]
    InvalidDestination { destination: String, reason: String },

    #[error("Invalid {field}: '{value}'")]
    #[diagnostic(
        code(bundlekit::input::invalid_name),
        help("Names must be a single path component without separators")
    )]
    InvalidName { field: String, value: String },

    // Structural conflicts
    #[error("Destination conflict at '{destination}': {first} and {second} differ")]
    #[diagnostic(
        code(bundlekit::assemble::destination_conflict),
        help("Map each destination from exactly one source, or make the sources identical")
    )]
    DestinationConflict {
        destination: String,
        first: String,
        second: String,
    },

    // Platform capability errors
    #[error("Extended attributes are not supported on {platform}")]
    #[diagnostic(code(bundlekit::marker::not_supported))]
    MarkerNotSupported { platform: String },

    // Bundle errors
    #[error("Not an assembled bundle: {path}")]
    #[diagnostic(
        code(bundlekit::bundle::not_a_bundle),
        help("Expected a directory containing Container/ and Metadata/")
    )]
    NotABundle { path: String },

    // Spec file errors
    #[error("Spec file not found: {path}")]
    #[diagnostic(code(bundlekit::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse spec file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read spec file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(bundlekit::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bundlekit::fs::io_error))]
    IoError { message: String },
}

impl BundleError {
    /// Process exit code reported by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BundleError::MissingSource { .. }
            | BundleError::NotExecutable { .. }
            | BundleError::MissingMetadataKey { .. }
            | BundleError::InvalidDestination { .. }
            | BundleError::InvalidName { .. }
            | BundleError::ConfigNotFound { .. }
            | BundleError::ConfigParseFailed { .. }
            | BundleError::ConfigReadFailed { .. } => EXIT_INPUT,
            BundleError::DestinationConflict { .. } => EXIT_CONFLICT,
            BundleError::MarkerNotSupported { .. } => EXIT_UNSUPPORTED,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for BundleError {
    fn from(err: serde_yaml::Error) -> Self {
        BundleError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for BundleError {
    fn from(err: inquire::InquireError) -> Self {
        BundleError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundleError>;
