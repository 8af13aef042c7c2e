#![allow(clippy::unwrap_used)]

use std::fs;

use super::*;
use crate::assembler::assemble;
use crate::domain::AssembledBundle;
use crate::test_fixtures::{create_project, create_temp_dir, demo_spec, write_executable};

fn demo_bundle() -> (tempfile::TempDir, AssembledBundle) {
    let (temp, project) = create_project();
    let bundle = assemble(&demo_spec(&project).build()).unwrap();
    (temp, bundle)
}

fn failed(report: &ValidationReport) -> Vec<&'static str> {
    report.failures().map(|c| c.name).collect()
}

#[test]
fn test_fresh_bundle_passes_every_check() {
    let (_temp, bundle) = demo_bundle();
    let report = validate(&bundle);
    assert!(report.is_ok());

    let names: Vec<_> = report.checks().iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            CHECK_EXECUTABLE,
            CHECK_RESOURCES,
            CHECK_MANIFEST,
            CHECK_EXECUTABLE_NAME
        ]
    );
}

#[test]
fn test_reopened_bundle_uses_resource_record() {
    let (_temp, bundle) = demo_bundle();
    assert!(validate(&AssembledBundle::at(bundle.root())).is_ok());
    assert!(validate(&AssembledBundle::open(bundle.root()).unwrap()).is_ok());
}

#[test]
fn test_nonexistent_bundle_reports_failures() {
    let temp = create_temp_dir();
    let report = validate(&AssembledBundle::at(temp.path().join("Nope.bundle")));

    assert!(!report.is_ok());
    assert_eq!(report.checks().len(), 4);
    assert_eq!(report.failures().count(), 4);
}

#[test]
fn test_second_executable_fails() {
    let (_temp, bundle) = demo_bundle();
    write_executable(&bundle.layout().executable_dir(), "helper");

    let report = validate(&bundle);
    let executable = report.check(CHECK_EXECUTABLE).unwrap();
    assert!(!executable.passed);
    assert!(executable.detail.contains("helper"));
    assert!(failed(&report).contains(&CHECK_EXECUTABLE_NAME));
}

#[cfg(unix)]
#[test]
fn test_executable_without_permission_fails() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, bundle) = demo_bundle();
    let path = bundle.layout().executable_dir().join("demo");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let report = validate(&bundle);
    assert_eq!(failed(&report), vec![CHECK_EXECUTABLE, CHECK_EXECUTABLE_NAME]);
}

#[test]
fn test_missing_resource_fails() {
    let (_temp, bundle) = demo_bundle();
    fs::remove_file(bundle.layout().resources_dir().join("icon.png")).unwrap();

    let report = validate(&bundle);
    assert_eq!(failed(&report), vec![CHECK_RESOURCES]);
    assert!(report.check(CHECK_RESOURCES).unwrap().detail.contains("missing: icon.png"));
}

#[test]
fn test_modified_resource_fails() {
    let (_temp, bundle) = demo_bundle();
    fs::write(bundle.layout().resources_dir().join("icon.png"), "tampered").unwrap();

    let report = validate(&AssembledBundle::at(bundle.root()));
    assert_eq!(failed(&report), vec![CHECK_RESOURCES]);
    assert!(report.check(CHECK_RESOURCES).unwrap().detail.contains("modified"));
}

#[test]
fn test_missing_record_fails_resources_only() {
    let (_temp, bundle) = demo_bundle();
    fs::remove_file(bundle.layout().record_path()).unwrap();

    let report = validate(&AssembledBundle::at(bundle.root()));
    assert_eq!(failed(&report), vec![CHECK_RESOURCES]);
}

#[test]
fn test_manifest_missing_key_fails() {
    let (_temp, bundle) = demo_bundle();
    fs::write(
        bundle.layout().manifest_path(),
        "bundle_name: Demo\nexecutable_name: demo\nidentifier: com.example.demo\n",
    )
    .unwrap();

    let report = validate(&bundle);
    assert_eq!(failed(&report), vec![CHECK_MANIFEST]);
    assert!(report.check(CHECK_MANIFEST).unwrap().detail.contains("version"));
}

#[test]
fn test_unparseable_manifest_fails() {
    let (_temp, bundle) = demo_bundle();
    fs::write(bundle.layout().manifest_path(), "{ not json").unwrap();

    let report = validate(&bundle);
    assert_eq!(failed(&report), vec![CHECK_MANIFEST, CHECK_EXECUTABLE_NAME]);
}

#[test]
fn test_executable_name_mismatch_fails() {
    let (_temp, bundle) = demo_bundle();
    let dir = bundle.layout().executable_dir();
    fs::rename(dir.join("demo"), dir.join("other")).unwrap();

    let report = validate(&bundle);
    assert_eq!(failed(&report), vec![CHECK_EXECUTABLE_NAME]);
    let detail = &report.check(CHECK_EXECUTABLE_NAME).unwrap().detail;
    assert!(detail.contains("'demo'") && detail.contains("'other'"));
}

#[test]
fn test_validation_does_not_write() {
    let (_temp, bundle) = demo_bundle();
    let before = crate::hash::hash_directory(bundle.root()).unwrap();
    let _ = validate(&bundle);
    assert_eq!(before, crate::hash::hash_directory(bundle.root()).unwrap());
}
