//! Inspect command implementation

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::InspectArgs;
use crate::domain::{AssembledBundle, RecordedResource};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::ui::display::display_inspection;

/// What a bundle declares and holds
#[derive(Debug, Serialize)]
pub struct Inspection {
    pub bundle: PathBuf,
    pub manifest: BTreeMap<String, Option<String>>,
    pub executable: Option<String>,
    pub resources: Vec<RecordedResource>,
}

/// Read manifest, executable and resource record of the bundle at `root`
pub fn collect(root: &Path) -> Result<Inspection> {
    let bundle = AssembledBundle::open(root)?;
    let manifest = Manifest::load(&bundle.layout().manifest_path())?;

    let mut executables: Vec<String> = fs::read_dir(bundle.layout().executable_dir())
        .map(|entries| {
            entries
                .filter_map(std::result::Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    executables.sort();

    Ok(Inspection {
        bundle: bundle.root().to_path_buf(),
        manifest: manifest.entries,
        executable: (!executables.is_empty()).then(|| executables.join(", ")),
        resources: bundle.resources().map(<[_]>::to_vec).unwrap_or_default(),
    })
}

/// Run inspect command
pub fn run(args: &InspectArgs) -> Result<()> {
    let inspection = collect(&args.bundle)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        display_inspection(&inspection);
    }
    Ok(())
}
