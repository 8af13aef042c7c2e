//! Common test utilities for bundlekit integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Spec file for the "Demo" bundle written by [`TestWorkspace::init_demo`]
#[allow(dead_code)]
pub const DEMO_SPEC: &str = r#"
executable: ./demo
output: ./dist
metadata:
  bundle_name: Demo
  executable_name: demo
  version: "1.0"
  identifier: com.example.demo
resources:
  - source: ./icon.png
    destination: Resources/icon.png
"#;

/// A project directory for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new, empty test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Workspace holding the demo executable, `icon.png` and `bundle.yaml`
    pub fn init_demo() -> Self {
        let workspace = Self::new();
        workspace.write_executable("demo");
        workspace.write_file("icon.png", "png-bytes");
        workspace.write_spec(DEMO_SPEC);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Write an executable shell script in workspace
    pub fn write_executable(&self, path: &str) -> PathBuf {
        let file_path = self.write_file(path, "#!/bin/sh\necho demo\n");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to set permissions");
        }
        file_path
    }

    /// Write `bundle.yaml`
    pub fn write_spec(&self, yaml: &str) -> PathBuf {
        self.write_file("bundle.yaml", yaml)
    }

    /// Path of `bundle.yaml`
    pub fn spec_path(&self) -> PathBuf {
        self.path.join("bundle.yaml")
    }

    /// Path of the demo bundle root
    pub fn bundle_path(&self) -> PathBuf {
        self.path.join("dist").join("Demo.bundle")
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Sorted entry names of a workspace directory
    pub fn list_dir(&self, path: &str) -> Vec<String> {
        list_dir(&self.path.join(path))
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorted entry names of `dir`
#[allow(dead_code)]
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| {
            e.expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_init_demo() {
        let workspace = TestWorkspace::init_demo();
        assert_eq!(
            workspace.list_dir("."),
            vec!["bundle.yaml", "demo", "icon.png"]
        );
    }
}
