//! Preflight: turn a [`BundleSpec`] into a checked assembly plan
//!
//! Nothing here writes to disk. Every input error the assembler can report
//! is raised before the first file is created.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::common::fs::{is_executable, normalize_lenient};
use crate::domain::{BundleSpec, ManifestFormat, ResourceMapping};
use crate::error::{BundleError, Result, input};
use crate::hash;

use super::STAGING_PREFIX;

/// One resource copy: resolved source to a path under `Container/Resources`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedResource {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub hash: String,
}

/// Everything needed to stage a bundle
#[derive(Debug, Clone)]
pub struct AssemblyPlan {
    pub bundle_root: PathBuf,
    pub executable_source: PathBuf,
    pub executable_name: String,
    pub resources: Vec<PlannedResource>,
    pub manifest: BTreeMap<String, String>,
    pub format: ManifestFormat,
}

/// Check `spec` and resolve it into a plan
pub fn plan(spec: &BundleSpec) -> Result<AssemblyPlan> {
    spec.check_metadata()?;
    let (Some(bundle_root), Some(executable_name)) = (spec.bundle_root(), spec.executable_name())
    else {
        return Err(input::missing_metadata_key("bundle_name"));
    };

    let executable_source = spec.base_dir().join(spec.executable());
    if !executable_source.exists() {
        return Err(input::missing_source(&executable_source));
    }
    if !is_executable(&executable_source) {
        return Err(input::not_executable(&executable_source));
    }

    let output = normalize_lenient(spec.target_root());
    let skip_root = normalize_lenient(&bundle_root);
    let mut expanded = Vec::new();
    for mapping in spec.resources() {
        expanded.extend(expand(mapping, spec.base_dir(), &skip_root)?);
    }
    check_output_outside(&expanded, &output)?;
    let resources = dedupe(expanded)?;
    check_nested(&resources)?;

    let manifest = spec
        .metadata()
        .iter()
        .map(|(k, v)| (k.clone(), v.trim().to_string()))
        .collect();

    tracing::debug!(
        bundle = %bundle_root.display(),
        resources = resources.len(),
        "preflight passed"
    );

    Ok(AssemblyPlan {
        bundle_root,
        executable_source,
        executable_name: executable_name.to_string(),
        resources,
        manifest,
        format: spec.manifest_format(),
    })
}

/// Resolve one mapping into `(source, destination)` pairs
fn expand(
    mapping: &ResourceMapping,
    base: &Path,
    bundle_root: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let destination = mapping.resource_path()?;

    if mapping.is_glob() {
        return expand_glob(mapping, base, &destination, bundle_root);
    }

    if destination.as_os_str().is_empty() {
        return Err(input::invalid_destination(
            mapping.destination(),
            "must name a path inside Resources/",
        ));
    }
    let source = base.join(mapping.source());
    if !source.exists() {
        return Err(input::missing_source(&source));
    }
    Ok(vec![(source, destination)])
}

/// Expand a glob source below its literal prefix directory
///
/// Each match keeps its path relative to the prefix under `destination`.
/// The bundle being replaced and the entries an assembly parks next to it
/// are never walked, so earlier bundles are not picked up.
fn expand_glob(
    mapping: &ResourceMapping,
    base: &Path,
    destination: &Path,
    bundle_root: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let pattern = mapping.source().to_string_lossy().replace('\\', "/");
    let parts: Vec<&str> = pattern.split('/').collect();
    let literal_len = parts
        .iter()
        .position(|p| p.contains(['*', '?', '[', '{']))
        .unwrap_or(parts.len());

    let prefix = parts[..literal_len].join("/");
    let expression = parts[literal_len..].join("/");
    let glob = Glob::new(&expression).map_err(|e| BundleError::ConfigParseFailed {
        path: pattern.clone(),
        reason: e.to_string(),
    })?;

    let root = if prefix.is_empty() {
        base.to_path_buf()
    } else {
        base.join(&prefix)
    };
    if !root.is_dir() {
        return Err(input::missing_source(&base.join(mapping.source())));
    }
    let root = normalize_lenient(&root);

    let mut matches: Vec<(PathBuf, PathBuf)> = WalkDir::new(&root)
        .into_iter()
        .filter_entry(|e| !is_assembly_output(e.path(), bundle_root))
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(&root).ok()?.to_path_buf();
            let candidate_str = relative.to_string_lossy().replace('\\', "/");
            let candidate = CandidatePath::from(candidate_str.as_str());
            glob.matched(&candidate)
                .is_some()
                .then(|| (entry.path().to_path_buf(), destination.join(&relative)))
        })
        .collect();

    if matches.is_empty() {
        return Err(input::missing_source(&base.join(mapping.source())));
    }
    matches.sort_by(|a, b| a.1.cmp(&b.1));
    tracing::debug!(pattern = %pattern, matches = matches.len(), "expanded glob source");
    Ok(matches)
}

/// `bundle_root` itself, or a staging or displaced sibling of it
fn is_assembly_output(path: &Path, bundle_root: &Path) -> bool {
    if path.starts_with(bundle_root) {
        return true;
    }
    if path.parent() != bundle_root.parent() {
        return false;
    }
    let (Some(name), Some(bundle_name)) = (path.file_name(), bundle_root.file_name()) else {
        return false;
    };
    let name = name.to_string_lossy();
    let displaced = format!(".{}.displaced-", bundle_name.to_string_lossy());
    name.starts_with(STAGING_PREFIX) || name.starts_with(&displaced)
}

/// A source directory holding the output root would copy the bundle into itself
fn check_output_outside(expanded: &[(PathBuf, PathBuf)], output: &Path) -> Result<()> {
    for (source, destination) in expanded {
        if source.is_dir() && output.starts_with(normalize_lenient(source)) {
            return Err(input::invalid_destination(
                display_destination(destination),
                format!("source {} contains the output directory", source.display()),
            ));
        }
    }
    Ok(())
}

/// Collapse duplicate destinations; differing content is a conflict
fn dedupe(expanded: Vec<(PathBuf, PathBuf)>) -> Result<Vec<PlannedResource>> {
    let mut by_destination: BTreeMap<PathBuf, usize> = BTreeMap::new();
    let mut resources: Vec<PlannedResource> = Vec::new();

    for (source, destination) in expanded {
        let content_hash = hash::hash_path(&source)?;
        if let Some(&index) = by_destination.get(&destination) {
            let existing = &resources[index];
            if !hash::verify_hash(&existing.hash, &content_hash) {
                return Err(input::destination_conflict(
                    display_destination(&destination),
                    &existing.source,
                    &source,
                ));
            }
            tracing::debug!(
                destination = %display_destination(&destination),
                "skipping identical duplicate mapping"
            );
            continue;
        }
        by_destination.insert(destination.clone(), resources.len());
        resources.push(PlannedResource {
            source,
            destination,
            hash: content_hash,
        });
    }

    Ok(resources)
}

/// Reject a mapping nested under another whose content it would contradict
fn check_nested(resources: &[PlannedResource]) -> Result<()> {
    for outer in resources {
        for inner in resources {
            let Ok(relative) = inner.destination.strip_prefix(&outer.destination) else {
                continue;
            };
            if relative.as_os_str().is_empty() {
                continue;
            }

            if !outer.source.is_dir() {
                return Err(input::destination_conflict(
                    display_destination(&inner.destination),
                    &outer.source,
                    &inner.source,
                ));
            }
            let shadowed = outer.source.join(relative);
            if shadowed.exists() && !hash::verify_hash(&hash::hash_path(&shadowed)?, &inner.hash) {
                return Err(input::destination_conflict(
                    display_destination(&inner.destination),
                    &shadowed,
                    &inner.source,
                ));
            }
        }
    }
    Ok(())
}

/// `Resources/`-prefixed forward-slash form used in messages
pub fn display_destination(destination: &Path) -> String {
    let relative = destination.to_string_lossy().replace('\\', "/");
    if relative.is_empty() {
        "Resources/".to_string()
    } else {
        format!("Resources/{relative}")
    }
}
