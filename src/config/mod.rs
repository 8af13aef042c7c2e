//! Spec file handling for bundlekit
//!
//! A spec file is YAML describing one bundle:
//!
//! ```yaml
//! executable: ./build/demo
//! output: ./dist
//! manifest_format: yaml
//! metadata:
//!   bundle_name: Demo
//!   executable_name: demo
//!   version: "1.0"
//!   identifier: com.example.demo
//! resources:
//!   - source: ./icon.png
//!     destination: Resources/icon.png
//! ```
//!
//! Relative paths are resolved against the directory containing the spec file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use normpath::PathExt;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::domain::{BundleSpec, ManifestFormat};
use crate::error::{Result, config};

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

/// A resource entry as written in the spec file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceEntry {
    pub source: PathBuf,
    pub destination: String,
}

/// Raw spec file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecFile {
    pub executable: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub manifest_format: ManifestFormat,

    /// Scalar values only; numbers and booleans are kept as written
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,

    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

impl SpecFile {
    /// Parse spec file contents; `origin` is only used in error messages
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| config::parse_failed(origin, e.to_string()))
    }

    /// Read and parse the spec file at `path`
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                config::not_found(path.display().to_string())
            } else {
                config::read_failed(path.display().to_string(), e.to_string())
            }
        })?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Convert into a [`BundleSpec`] rooted at `base_dir`
    ///
    /// `output_override` replaces the spec's output directory and is taken
    /// as given rather than relative to `base_dir`.
    pub fn into_spec(
        self,
        base_dir: &Path,
        output_override: Option<PathBuf>,
        origin: &str,
    ) -> Result<BundleSpec> {
        let target_root = output_override.unwrap_or_else(|| base_dir.join(&self.output));

        let mut builder = BundleSpec::builder(self.executable, target_root)
            .base_dir(base_dir)
            .manifest_format(self.manifest_format);

        for (key, value) in self.metadata {
            let value = scalar_to_string(&value).ok_or_else(|| {
                config::parse_failed(origin, format!("metadata '{key}' must be a scalar value"))
            })?;
            builder = builder.metadata(key, value);
        }

        for entry in self.resources {
            builder = builder.resource(entry.source, entry.destination);
        }

        Ok(builder.build())
    }
}

/// Load the spec file at `path` into a [`BundleSpec`]
pub fn load_spec(path: &Path, output_override: Option<PathBuf>) -> Result<BundleSpec> {
    let spec_file = SpecFile::read(path)?;
    let base_dir = spec_base_dir(path);
    tracing::debug!(spec = %path.display(), base = %base_dir.display(), "loaded spec file");
    spec_file.into_spec(&base_dir, output_override, &path.display().to_string())
}

fn spec_base_dir(spec_path: &Path) -> PathBuf {
    let parent = match spec_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    parent
        .normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or(parent)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
