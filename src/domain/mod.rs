//! Domain models for bundlekit
//!
//! This module contains the value types the assembler and validator exchange:
//! the declared bundle spec, the on-disk bundle handle and the validation report.

pub mod bundle;
pub mod report;
pub mod spec;

pub use bundle::{AssembledBundle, BundleLayout, RecordedResource, ResourceRecord};
pub use report::{CheckResult, ValidationReport};
pub use spec::{BundleSpec, ManifestFormat, REQUIRED_KEYS, ResourceMapping};
