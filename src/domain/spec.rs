//! Bundle spec domain types
//!
//! A [`BundleSpec`] is the declared shape of a bundle: where the executable
//! comes from, which resources go where, and the manifest metadata.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::bundle::{BUNDLE_EXTENSION, RESOURCES_DIR};
use crate::error::{Result, input};

/// Metadata keys every manifest must carry with a non-empty value
pub const REQUIRED_KEYS: [&str; 4] = ["bundle_name", "executable_name", "version", "identifier"];

const GLOB_CHARS: [char; 4] = ['*', '?', '[', '{'];

/// Serialization used for `Metadata/manifest`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestFormat::Yaml => write!(f, "yaml"),
            ManifestFormat::Json => write!(f, "json"),
        }
    }
}

/// A single resource mapping: source on disk, destination inside `Container/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMapping {
    source: PathBuf,
    destination: String,
}

impl ResourceMapping {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination as written by the caller
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether the source is a glob pattern rather than a single path
    pub fn is_glob(&self) -> bool {
        self.source.to_string_lossy().contains(GLOB_CHARS)
    }

    /// Destination relative to `Container/Resources`
    ///
    /// A leading `Resources/` component is accepted and implied when absent.
    /// The result may be empty, which names the resources directory itself.
    pub fn resource_path(&self) -> Result<PathBuf> {
        let raw = self.destination.trim().replace('\\', "/");
        if raw.starts_with('/') || Path::new(&raw).is_absolute() {
            return Err(input::invalid_destination(
                &self.destination,
                "must be a relative path",
            ));
        }

        let mut parts: Vec<&str> = raw.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
        if parts.contains(&"..") {
            return Err(input::invalid_destination(
                &self.destination,
                "must not contain '..'",
            ));
        }
        if parts.first() == Some(&RESOURCES_DIR) {
            parts.remove(0);
        }

        let path: PathBuf = parts.iter().collect();
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(input::invalid_destination(
                &self.destination,
                "must stay inside Resources/",
            ));
        }
        Ok(path)
    }
}

/// Declared shape of a bundle
///
/// Immutable once built; construct with [`BundleSpec::builder`].
#[derive(Debug, Clone)]
pub struct BundleSpec {
    executable: PathBuf,
    target_root: PathBuf,
    resources: Vec<ResourceMapping>,
    metadata: BTreeMap<String, String>,
    manifest_format: ManifestFormat,
    base_dir: PathBuf,
}

impl BundleSpec {
    /// Start building a spec for `executable`, assembled under `target_root`
    pub fn builder(
        executable: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
    ) -> BundleSpecBuilder {
        BundleSpecBuilder {
            spec: BundleSpec {
                executable: executable.into(),
                target_root: target_root.into(),
                resources: Vec::new(),
                metadata: BTreeMap::new(),
                manifest_format: ManifestFormat::default(),
                base_dir: PathBuf::from("."),
            },
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    pub fn resources(&self) -> &[ResourceMapping] {
        &self.resources
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn manifest_format(&self) -> ManifestFormat {
        self.manifest_format
    }

    /// Directory glob sources are expanded against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn bundle_name(&self) -> Option<&str> {
        self.non_empty("bundle_name")
    }

    pub fn executable_name(&self) -> Option<&str> {
        self.non_empty("executable_name")
    }

    /// Root directory of the assembled bundle, once the name is known
    pub fn bundle_root(&self) -> Option<PathBuf> {
        self.bundle_name()
            .map(|name| self.target_root.join(format!("{name}.{BUNDLE_EXTENSION}")))
    }

    /// Check required metadata keys and the names they carry
    pub fn check_metadata(&self) -> Result<()> {
        for key in REQUIRED_KEYS {
            if self.non_empty(key).is_none() {
                return Err(input::missing_metadata_key(key));
            }
        }

        for field in ["bundle_name", "executable_name"] {
            let value = self.non_empty(field).unwrap_or_default();
            if !is_single_component(value) {
                return Err(input::invalid_name(field, value));
            }
        }
        Ok(())
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !name.contains(['/', '\\'])
}

/// Builder for [`BundleSpec`]
#[derive(Debug)]
pub struct BundleSpecBuilder {
    spec: BundleSpec,
}

impl BundleSpecBuilder {
    pub fn resource(mut self, source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        self.spec
            .resources
            .push(ResourceMapping::new(source, destination));
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.metadata.insert(key.into(), value.into());
        self
    }

    pub fn manifest_format(mut self, format: ManifestFormat) -> Self {
        self.spec.manifest_format = format;
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spec.base_dir = dir.into();
        self
    }

    pub fn build(self) -> BundleSpec {
        self.spec
    }
}
