//! Assembled bundle domain types
//!
//! Layout contract:
//!
//! ```text
//! <bundle_name>.bundle/
//!   Container/
//!     Executable/<executable_name>
//!     Resources/...
//!   Metadata/manifest
//!   Metadata/resources
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, Result, fs as fs_err};

pub const BUNDLE_EXTENSION: &str = "bundle";
pub const CONTAINER_DIR: &str = "Container";
pub const EXECUTABLE_DIR: &str = "Executable";
pub const RESOURCES_DIR: &str = "Resources";
pub const METADATA_DIR: &str = "Metadata";
pub const MANIFEST_FILE: &str = "manifest";
pub const RESOURCE_RECORD_FILE: &str = "resources";

/// Paths of the fixed bundle layout below a root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
}

impl BundleLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn container_dir(&self) -> PathBuf {
        self.root.join(CONTAINER_DIR)
    }

    pub fn executable_dir(&self) -> PathBuf {
        self.container_dir().join(EXECUTABLE_DIR)
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.container_dir().join(RESOURCES_DIR)
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.metadata_dir().join(MANIFEST_FILE)
    }

    pub fn record_path(&self) -> PathBuf {
        self.metadata_dir().join(RESOURCE_RECORD_FILE)
    }

    /// Whether the top-level directories of the layout are present
    pub fn looks_like_bundle(&self) -> bool {
        self.container_dir().is_dir() && self.metadata_dir().is_dir()
    }
}

/// One resource as recorded at assembly time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResource {
    /// Forward-slash path relative to `Container/Resources`
    pub destination: String,
    /// BLAKE3 hash of the file or directory content
    pub hash: String,
}

/// Contents of `Metadata/resources`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(default)]
    pub resources: Vec<RecordedResource>,
}

impl ResourceRecord {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| fs_err::read_failed(path, &e))?;
        Self::from_yaml(&content).map_err(|e| match e {
            BundleError::ConfigParseFailed { reason, .. } => BundleError::FileReadFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }
}

/// Handle to a bundle on disk
///
/// Returned by a successful assembly, or attached to an existing directory
/// with [`AssembledBundle::at`] / [`AssembledBundle::open`]. The caller owns
/// the directory; dropping the handle does not touch it.
#[derive(Debug, Clone)]
pub struct AssembledBundle {
    layout: BundleLayout,
    resources: Option<Vec<RecordedResource>>,
}

impl AssembledBundle {
    pub(crate) fn new(root: PathBuf, resources: Vec<RecordedResource>) -> Self {
        Self {
            layout: BundleLayout::new(root),
            resources: Some(resources),
        }
    }

    /// Attach to `root` without checking anything
    ///
    /// The resource list is read from the record when validating.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: BundleLayout::new(root),
            resources: None,
        }
    }

    /// Attach to `root`, requiring the bundle layout and a readable record
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = BundleLayout::new(root);
        if !layout.looks_like_bundle() {
            return Err(BundleError::NotABundle {
                path: layout.root().display().to_string(),
            });
        }
        let record = ResourceRecord::load(&layout.record_path())?;
        Ok(Self {
            layout,
            resources: Some(record.resources),
        })
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    /// Resources known from assembly or from [`AssembledBundle::open`]
    pub fn resources(&self) -> Option<&[RecordedResource]> {
        self.resources.as_deref()
    }
}
