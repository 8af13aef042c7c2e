//! Structural validation of assembled bundles
//!
//! Validation is advisory: it never fails and never writes. A broken or
//! missing bundle produces a report with failing entries.

#[cfg(test)]
mod tests;

use std::fs;

use crate::common::fs::is_executable;
use crate::domain::{
    AssembledBundle, BundleLayout, CheckResult, RecordedResource, ResourceRecord,
    ValidationReport,
};
use crate::error::Result;
use crate::hash;
use crate::manifest::Manifest;

pub const CHECK_EXECUTABLE: &str = "executable";
pub const CHECK_RESOURCES: &str = "resources";
pub const CHECK_MANIFEST: &str = "manifest";
pub const CHECK_EXECUTABLE_NAME: &str = "executable_name";

/// Run all structural checks against `bundle`
pub fn validate(bundle: &AssembledBundle) -> ValidationReport {
    let layout = bundle.layout();
    let executable = scan_executable(layout);
    let manifest = Manifest::load(&layout.manifest_path());

    let checks = vec![
        check_executable(&executable),
        check_resources(bundle),
        check_manifest(&manifest),
        check_executable_name(&executable, &manifest),
    ];

    let report = ValidationReport::new(bundle.root(), checks);
    for failure in report.failures() {
        tracing::debug!(check = failure.name, detail = %failure.detail, "check failed");
    }
    report
}

/// Name of the single executable in `Container/Executable`, or why there is none
fn scan_executable(layout: &BundleLayout) -> std::result::Result<String, String> {
    let dir = layout.executable_dir();
    let entries = fs::read_dir(&dir).map_err(|e| format!("cannot read {}: {e}", dir.display()))?;

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let [name] = names.as_slice() else {
        return Err(if names.is_empty() {
            "Container/Executable is empty".to_string()
        } else {
            format!(
                "expected exactly one file in Container/Executable, found {}: {}",
                names.len(),
                names.join(", ")
            )
        });
    };

    let path = dir.join(name);
    if !path.is_file() {
        return Err(format!("{name} is not a regular file"));
    }
    if !is_executable(&path) {
        return Err(format!("{name} lacks execute permission"));
    }
    Ok(name.clone())
}

fn check_executable(scan: &std::result::Result<String, String>) -> CheckResult {
    match scan {
        Ok(name) => CheckResult::pass(CHECK_EXECUTABLE, format!("{name} is executable")),
        Err(reason) => CheckResult::fail(CHECK_EXECUTABLE, reason.clone()),
    }
}

fn check_resources(bundle: &AssembledBundle) -> CheckResult {
    let recorded: Vec<RecordedResource> = match bundle.resources() {
        Some(resources) => resources.to_vec(),
        None => match ResourceRecord::load(&bundle.layout().record_path()) {
            Ok(record) => record.resources,
            Err(e) => {
                return CheckResult::fail(CHECK_RESOURCES, format!("resource record unreadable: {e}"));
            }
        },
    };

    let resources_dir = bundle.layout().resources_dir();
    let mut missing = Vec::new();
    let mut modified = Vec::new();

    for resource in &recorded {
        let path = resources_dir.join(&resource.destination);
        if fs::symlink_metadata(&path).is_err() {
            missing.push(resource.destination.as_str());
            continue;
        }
        let matches: Result<bool> =
            hash::hash_path(&path).map(|actual| hash::verify_hash(&resource.hash, &actual));
        if !matches.unwrap_or(false) {
            modified.push(resource.destination.as_str());
        }
    }

    if missing.is_empty() && modified.is_empty() {
        return CheckResult::pass(
            CHECK_RESOURCES,
            format!("{} resource(s) present", recorded.len()),
        );
    }

    let mut problems = Vec::new();
    if !missing.is_empty() {
        problems.push(format!("missing: {}", missing.join(", ")));
    }
    if !modified.is_empty() {
        problems.push(format!("modified: {}", modified.join(", ")));
    }
    CheckResult::fail(CHECK_RESOURCES, problems.join("; "))
}

fn check_manifest(manifest: &Result<Manifest>) -> CheckResult {
    match manifest {
        Ok(manifest) => {
            let missing = manifest.missing_required();
            if missing.is_empty() {
                CheckResult::pass(
                    CHECK_MANIFEST,
                    format!("valid {} manifest with all required keys", manifest.format),
                )
            } else {
                CheckResult::fail(
                    CHECK_MANIFEST,
                    format!("missing or empty keys: {}", missing.join(", ")),
                )
            }
        }
        Err(e) => CheckResult::fail(CHECK_MANIFEST, e.to_string()),
    }
}

fn check_executable_name(
    scan: &std::result::Result<String, String>,
    manifest: &Result<Manifest>,
) -> CheckResult {
    let Ok(manifest) = manifest else {
        return CheckResult::fail(CHECK_EXECUTABLE_NAME, "manifest is not readable");
    };
    let Some(declared) = manifest.get("executable_name") else {
        return CheckResult::fail(CHECK_EXECUTABLE_NAME, "manifest declares no executable_name");
    };
    let Ok(found) = scan else {
        return CheckResult::fail(
            CHECK_EXECUTABLE_NAME,
            format!("manifest declares '{declared}' but no single executable was found"),
        );
    };

    if declared == found.as_str() {
        CheckResult::pass(CHECK_EXECUTABLE_NAME, format!("'{found}' matches manifest"))
    } else {
        CheckResult::fail(
            CHECK_EXECUTABLE_NAME,
            format!("manifest declares '{declared}' but Container/Executable holds '{found}'"),
        )
    }
}
