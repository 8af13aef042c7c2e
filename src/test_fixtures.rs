//! Test fixtures for building bundle inputs with a single call.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_project, demo_spec};
//!
//! #[test]
//! fn my_test() {
//!     // Temp directory with an executable `demo` and `icon.png`
//!     let (temp, project) = create_project();
//!
//!     // Spec for the "Demo" bundle, output in <project>/dist
//!     let spec = demo_spec(&project).build();
//! }
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::spec::BundleSpecBuilder;
use crate::domain::BundleSpec;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write a file below `base`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(base: &Path, relative: &str, content: &str) -> PathBuf {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Write an executable script below `base`.
///
/// # Panics
///
/// Panics if the file cannot be written or its mode set.
pub fn write_executable(base: &Path, relative: &str) -> PathBuf {
    let path = write_file(base, relative, "#!/bin/sh\necho demo\n");
    crate::common::fs::set_executable_mode(&path).expect("Failed to set executable mode");
    path
}

/// Create a project directory holding `demo` (executable) and `icon.png`.
///
/// # Panics
///
/// Panics if any file cannot be created.
#[must_use]
pub fn create_project() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let project = temp.path().to_path_buf();
    write_executable(&project, "demo");
    write_file(&project, "icon.png", "png-bytes");
    (temp, project)
}

/// Spec builder for the "Demo" bundle rooted at `project`.
///
/// Output goes to `<project>/dist`; `icon.png` maps to `Resources/icon.png`.
#[must_use]
pub fn demo_spec(project: &Path) -> BundleSpecBuilder {
    BundleSpec::builder("demo", project.join("dist"))
        .base_dir(project)
        .metadata("bundle_name", "Demo")
        .metadata("executable_name", "demo")
        .metadata("version", "1.0")
        .metadata("identifier", "com.example.demo")
        .resource("./icon.png", "Resources/icon.png")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project() {
        let (_temp, project) = create_project();
        assert!(project.join("demo").exists());
        assert!(crate::common::fs::is_executable(&project.join("demo")));
        assert!(project.join("icon.png").exists());
    }

    #[test]
    fn test_demo_spec_is_complete() {
        let (_temp, project) = create_project();
        let spec = demo_spec(&project).build();
        assert!(spec.check_metadata().is_ok());
        assert_eq!(spec.resources().len(), 1);
    }
}
