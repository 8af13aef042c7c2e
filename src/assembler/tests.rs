#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use super::assemble;
use super::plan::{display_destination, plan};
use crate::domain::{BundleSpec, ManifestFormat};
use crate::error::BundleError;
use crate::manifest::Manifest;
use crate::test_fixtures::{create_project, demo_spec, write_executable, write_file};
use crate::validator::validate;

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_demo_bundle_assembles_and_validates() {
    let (_temp, project) = create_project();
    let bundle = assemble(&demo_spec(&project).build()).unwrap();

    let root = project.join("dist").join("Demo.bundle");
    assert_eq!(bundle.root(), root);
    assert!(root.join("Container/Executable/demo").is_file());
    assert!(crate::common::fs::is_executable(
        &root.join("Container/Executable/demo")
    ));
    assert_eq!(
        fs::read_to_string(root.join("Container/Resources/icon.png")).unwrap(),
        "png-bytes"
    );

    let manifest = Manifest::load(&root.join("Metadata/manifest")).unwrap();
    assert_eq!(manifest.get("bundle_name"), Some("Demo"));
    assert_eq!(manifest.get("executable_name"), Some("demo"));
    assert_eq!(manifest.get("version"), Some("1.0"));
    assert_eq!(manifest.get("identifier"), Some("com.example.demo"));

    let report = validate(&bundle);
    assert!(report.is_ok(), "{report:?}");
    assert_eq!(report.checks().len(), 4);
}

#[test]
fn test_no_staging_leftovers() {
    let (_temp, project) = create_project();
    assemble(&demo_spec(&project).build()).unwrap();
    assert_eq!(entries(&project.join("dist")), vec!["Demo.bundle"]);
}

#[test]
fn test_reassembly_replaces_previous_bundle() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project).build();
    let bundle = assemble(&spec).unwrap();

    let stale = bundle.layout().resources_dir().join("stale.txt");
    fs::write(&stale, "old").unwrap();

    let bundle = assemble(&spec).unwrap();
    assert!(!stale.exists());
    assert_eq!(entries(&bundle.layout().resources_dir()), vec!["icon.png"]);
    assert!(validate(&bundle).is_ok());
}

#[test]
fn test_missing_version_writes_nothing() {
    let (_temp, project) = create_project();
    let spec = BundleSpec::builder("demo", project.join("dist"))
        .base_dir(&project)
        .metadata("bundle_name", "Demo")
        .metadata("executable_name", "demo")
        .metadata("identifier", "com.example.demo")
        .resource("./icon.png", "Resources/icon.png")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::MissingMetadataKey { ref key } if key == "version"));
    assert_eq!(err.exit_code(), 2);
    assert!(!project.join("dist").exists());
}

#[test]
fn test_missing_executable() {
    let (_temp, project) = create_project();
    let spec = BundleSpec::builder("nope", project.join("dist"))
        .base_dir(&project)
        .metadata("bundle_name", "Demo")
        .metadata("executable_name", "demo")
        .metadata("version", "1.0")
        .metadata("identifier", "com.example.demo")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::MissingSource { .. }));
    assert!(!project.join("dist").exists());
}

#[cfg(unix)]
#[test]
fn test_non_executable_source_rejected() {
    let (_temp, project) = create_project();
    write_file(&project, "plain", "not a program");
    let spec = BundleSpec::builder("plain", project.join("dist"))
        .base_dir(&project)
        .metadata("bundle_name", "Demo")
        .metadata("executable_name", "plain")
        .metadata("version", "1.0")
        .metadata("identifier", "com.example.demo")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::NotExecutable { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_missing_resource_source() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project)
        .resource("./missing.txt", "Resources/missing.txt")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::MissingSource { ref path } if path.contains("missing.txt")));
    assert!(!project.join("dist").exists());
}

#[test]
fn test_conflicting_destinations() {
    let (_temp, project) = create_project();
    write_file(&project, "other.png", "different-bytes");
    let spec = demo_spec(&project)
        .resource("./other.png", "Resources/icon.png")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(
        matches!(err, BundleError::DestinationConflict { ref destination, .. } if destination == "Resources/icon.png")
    );
    assert_eq!(err.exit_code(), 3);
    assert!(!project.join("dist").exists());
}

#[test]
fn test_identical_duplicate_is_accepted() {
    let (_temp, project) = create_project();
    write_file(&project, "copy.png", "png-bytes");
    let spec = demo_spec(&project)
        .resource("./copy.png", "icon.png")
        .build();

    let bundle = assemble(&spec).unwrap();
    assert_eq!(bundle.resources().unwrap().len(), 1);
    assert!(validate(&bundle).is_ok());
}

#[test]
fn test_file_under_file_destination_conflicts() {
    let (_temp, project) = create_project();
    write_file(&project, "readme.txt", "hello");
    let spec = demo_spec(&project)
        .resource("./readme.txt", "Resources/icon.png/readme.txt")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::DestinationConflict { .. }));
}

#[test]
fn test_directory_resource_and_nested_overlay() {
    let (_temp, project) = create_project();
    write_file(&project, "assets/a.txt", "a");
    write_file(&project, "assets/sub/b.txt", "b");
    write_file(&project, "extra.txt", "extra");
    let spec = demo_spec(&project)
        .resource("./assets", "Resources/assets")
        .resource("./extra.txt", "Resources/assets/extra.txt")
        .build();

    let bundle = assemble(&spec).unwrap();
    let resources = bundle.layout().resources_dir();
    assert!(resources.join("assets/a.txt").is_file());
    assert!(resources.join("assets/sub/b.txt").is_file());
    assert!(resources.join("assets/extra.txt").is_file());
    assert!(validate(&bundle).is_ok());
}

#[test]
fn test_nested_overlay_contradicting_directory_conflicts() {
    let (_temp, project) = create_project();
    write_file(&project, "assets/a.txt", "a");
    write_file(&project, "replacement.txt", "not a");
    let spec = demo_spec(&project)
        .resource("./assets", "Resources/assets")
        .resource("./replacement.txt", "Resources/assets/a.txt")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::DestinationConflict { .. }));
}

#[test]
fn test_invalid_destination_rejected() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project)
        .resource("./icon.png", "../escape.png")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(matches!(err, BundleError::InvalidDestination { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_glob_source_expands_relative_to_prefix() {
    let (_temp, project) = create_project();
    write_file(&project, "assets/one.png", "1");
    write_file(&project, "assets/deep/two.png", "2");
    write_file(&project, "assets/notes.txt", "skip");
    let spec = demo_spec(&project)
        .resource("assets/**/*.png", "Resources/images")
        .build();

    let planned = plan(&spec).unwrap();
    let destinations: Vec<String> = planned
        .resources
        .iter()
        .map(|r| display_destination(&r.destination))
        .collect();
    assert_eq!(
        destinations,
        vec![
            "Resources/icon.png",
            "Resources/images/deep/two.png",
            "Resources/images/one.png",
        ]
    );

    let bundle = assemble(&spec).unwrap();
    assert!(!bundle.layout().resources_dir().join("images/notes.txt").exists());
    assert!(validate(&bundle).is_ok());
}

#[test]
fn test_glob_without_matches_is_missing_source() {
    let (_temp, project) = create_project();
    write_file(&project, "assets/notes.txt", "x");
    let spec = demo_spec(&project)
        .resource("assets/*.png", "Resources/")
        .build();

    assert!(matches!(
        assemble(&spec).unwrap_err(),
        BundleError::MissingSource { .. }
    ));
}

#[test]
fn test_glob_skips_output_directory() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project).resource("**/*.png", "Resources/all").build();

    assemble(&spec).unwrap();
    // The first bundle holds PNGs too; a second run must not pick them up
    let bundle = assemble(&spec).unwrap();
    assert_eq!(
        entries(&bundle.layout().resources_dir().join("all")),
        vec!["icon.png"]
    );
}

#[test]
fn test_glob_with_output_in_project_directory() {
    let (_temp, project) = create_project();
    write_file(&project, "assets/one.png", "1");
    let spec = BundleSpec::builder("demo", &project)
        .base_dir(&project)
        .metadata("bundle_name", "Demo")
        .metadata("executable_name", "demo")
        .metadata("version", "1.0")
        .metadata("identifier", "com.example.demo")
        .resource("assets/*.png", "Resources/images")
        .resource("*.png", "Resources/top")
        .build();

    assemble(&spec).unwrap();
    let bundle = assemble(&spec).unwrap();
    let resources = bundle.layout().resources_dir();
    assert_eq!(entries(&resources.join("images")), vec!["one.png"]);
    assert_eq!(entries(&resources.join("top")), vec!["icon.png"]);
    assert!(validate(&bundle).is_ok());
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_with_different_targets_conflict() {
    use std::os::unix::fs::symlink;

    let (_temp, project) = create_project();
    write_file(&project, "x.txt", "one");
    write_file(&project, "y.txt", "two");
    for (dir, target) in [("a", "x.txt"), ("b", "y.txt")] {
        fs::create_dir_all(project.join(dir)).unwrap();
        symlink(project.join(target), project.join(dir).join("f.txt")).unwrap();
    }
    let spec = demo_spec(&project)
        .resource("./a", "Resources/d")
        .resource("./b", "Resources/d")
        .build();

    let err = assemble(&spec).unwrap_err();
    assert!(
        matches!(err, BundleError::DestinationConflict { ref destination, .. } if destination == "Resources/d")
    );
    assert!(!project.join("dist").exists());
}

#[cfg(unix)]
#[test]
fn test_directory_with_self_link_assembles() {
    let (_temp, project) = create_project();
    write_file(&project, "assets/a.txt", "a");
    std::os::unix::fs::symlink(".", project.join("assets/self")).unwrap();
    let spec = demo_spec(&project).resource("./assets", "Resources/assets").build();

    let bundle = assemble(&spec).unwrap();
    assert_eq!(
        entries(&bundle.layout().resources_dir().join("assets")),
        vec!["a.txt"]
    );
    assert!(validate(&bundle).is_ok());
}

#[test]
fn test_source_containing_output_is_rejected() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project).resource(".", "Resources/project").build();

    assert!(matches!(
        assemble(&spec).unwrap_err(),
        BundleError::InvalidDestination { .. }
    ));
}

#[test]
fn test_json_manifest() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project)
        .manifest_format(ManifestFormat::Json)
        .build();

    let bundle = assemble(&spec).unwrap();
    let content = fs::read_to_string(bundle.layout().manifest_path()).unwrap();
    assert!(content.trim_start().starts_with('{'));
    assert!(validate(&bundle).is_ok());
}

#[test]
fn test_extra_metadata_is_written() {
    let (_temp, project) = create_project();
    let spec = demo_spec(&project).metadata("copyright", "ACME").build();

    let bundle = assemble(&spec).unwrap();
    let manifest = Manifest::load(&bundle.layout().manifest_path()).unwrap();
    assert_eq!(manifest.get("copyright"), Some("ACME"));
}

#[test]
fn test_failed_assembly_keeps_previous_bundle() {
    let (_temp, project) = create_project();
    let first = assemble(&demo_spec(&project).build()).unwrap();

    write_file(&project, "other.png", "different-bytes");
    let conflicting = demo_spec(&project)
        .resource("./other.png", "Resources/icon.png")
        .build();
    assert!(assemble(&conflicting).is_err());

    assert!(validate(&first).is_ok());
    assert_eq!(entries(&project.join("dist")), vec!["Demo.bundle"]);
}

#[test]
fn test_executable_renamed_to_declared_name() {
    let (_temp, project) = create_project();
    write_executable(&project, "build/demo-x86_64");
    let spec = BundleSpec::builder("build/demo-x86_64", project.join("dist"))
        .base_dir(&project)
        .metadata("bundle_name", "Demo")
        .metadata("executable_name", "demo")
        .metadata("version", "1.0")
        .metadata("identifier", "com.example.demo")
        .build();

    let bundle = assemble(&spec).unwrap();
    assert_eq!(entries(&bundle.layout().executable_dir()), vec!["demo"]);
    assert!(validate(&bundle).is_ok());
}
