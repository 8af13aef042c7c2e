//! Write a planned bundle into a staging directory

use std::fs;
use std::path::Path;

use crate::common::fs::{copy_file, copy_path, set_executable_mode};
use crate::domain::{BundleLayout, RecordedResource, ResourceRecord};
use crate::error::{Result, fs as fs_err};
use crate::hash;
use crate::manifest;
use crate::progress::ProgressDisplay;

use super::plan::AssemblyPlan;

/// Build the full layout under `staging_root`
///
/// Returns the resource record as written to `Metadata/resources`.
pub fn stage(
    plan: &AssemblyPlan,
    staging_root: &Path,
    progress: &ProgressDisplay,
) -> Result<Vec<RecordedResource>> {
    let layout = BundleLayout::new(staging_root);
    for dir in [
        layout.executable_dir(),
        layout.resources_dir(),
        layout.metadata_dir(),
    ] {
        fs::create_dir_all(&dir).map_err(|e| fs_err::write_failed(&dir, &e))?;
    }
    set_executable_mode(staging_root)?;

    let executable = layout.executable_dir().join(&plan.executable_name);
    copy_file(&plan.executable_source, &executable)?;
    set_executable_mode(&executable)?;
    progress.update(&plan.executable_name);

    for resource in &plan.resources {
        let target = layout.resources_dir().join(&resource.destination);
        copy_path(&resource.source, &target)?;
        progress.update(&resource.destination.to_string_lossy());
    }

    // Hash what landed on disk: nested mappings merge into their parent
    let mut recorded = Vec::with_capacity(plan.resources.len());
    for resource in &plan.resources {
        let staged = layout.resources_dir().join(&resource.destination);
        recorded.push(RecordedResource {
            destination: resource.destination.to_string_lossy().replace('\\', "/"),
            hash: hash::hash_path(&staged)?,
        });
    }

    let manifest_path = layout.manifest_path();
    let content = manifest::render(&plan.manifest, plan.format)?;
    fs::write(&manifest_path, content).map_err(|e| fs_err::write_failed(&manifest_path, &e))?;

    let record_path = layout.record_path();
    let record = ResourceRecord {
        resources: recorded.clone(),
    };
    fs::write(&record_path, record.to_yaml()?)
        .map_err(|e| fs_err::write_failed(&record_path, &e))?;

    Ok(recorded)
}
