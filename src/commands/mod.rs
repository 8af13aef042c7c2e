//! Command implementations for the bundlekit CLI

pub mod assemble;
pub mod clean;
pub mod completions;
pub mod inspect;
pub mod strip_marker;
pub mod validate;
pub mod version;
