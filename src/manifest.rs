//! `Metadata/manifest` serialization
//!
//! The manifest is a flat key/value mapping written as YAML or JSON. Reading
//! detects the format from the content: a document starting with `{` is JSON.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::{ManifestFormat, REQUIRED_KEYS};
use crate::error::{BundleError, Result, fs as fs_err};

/// Render metadata in `format`, keys in sorted order
pub fn render(metadata: &BTreeMap<String, String>, format: ManifestFormat) -> Result<String> {
    match format {
        ManifestFormat::Yaml => Ok(serde_yaml::to_string(metadata)?),
        ManifestFormat::Json => {
            let mut json = serde_json::to_string_pretty(metadata)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Format a manifest document is written in
pub fn detect_format(content: &str) -> ManifestFormat {
    if content.trim_start().starts_with('{') {
        ManifestFormat::Json
    } else {
        ManifestFormat::Yaml
    }
}

/// A parsed manifest
///
/// Values that are not strings are kept as `None` so that checks can tell
/// "present but wrong type" apart from "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub format: ManifestFormat,
    pub entries: BTreeMap<String, Option<String>>,
}

impl Manifest {
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let format = detect_format(content);
        let parse_failed = |reason: String| BundleError::ConfigParseFailed {
            path: origin.display().to_string(),
            reason,
        };

        let entries = match format {
            ManifestFormat::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(content).map_err(|e| parse_failed(e.to_string()))?;
                let object = value
                    .as_object()
                    .ok_or_else(|| parse_failed("manifest is not a JSON object".to_string()))?;
                object
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_str().map(str::to_string)))
                    .collect()
            }
            ManifestFormat::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| parse_failed(e.to_string()))?;
                let mapping = value
                    .as_mapping()
                    .ok_or_else(|| parse_failed("manifest is not a YAML mapping".to_string()))?;
                let mut entries = BTreeMap::new();
                for (k, v) in mapping {
                    let key = k
                        .as_str()
                        .ok_or_else(|| parse_failed("manifest keys must be strings".to_string()))?;
                    entries.insert(key.to_string(), v.as_str().map(str::to_string));
                }
                entries
            }
        };

        Ok(Self { format, entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                fs_err::not_found(path)
            } else {
                fs_err::read_failed(path, &e)
            }
        })?;
        Self::parse(&content, path)
    }

    /// Non-empty string value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(Option::as_deref)
            .filter(|v| !v.trim().is_empty())
    }

    /// Required keys that are absent, empty or not strings
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .into_iter()
            .filter(|key| self.get(key).is_none())
            .collect()
    }
}
