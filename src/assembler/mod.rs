//! Bundle assembly
//!
//! Assembly runs in three phases:
//! 1. Preflight every input ([`plan`]), writing nothing
//! 2. Stage the complete layout in a hidden directory inside the target root
//! 3. Swap the staged tree into place under a [`Transaction`]
//!
//! Re-assembling into the same root replaces the previous bundle wholesale,
//! and a failure in any phase leaves the target root as it was.

pub mod plan;
mod stage;

#[cfg(test)]
mod tests;

use std::fs;

use crate::common::fs::first_missing_ancestor;
use crate::domain::{AssembledBundle, BundleSpec};
use crate::error::{Result, fs as fs_err};
use crate::progress::ProgressDisplay;
use crate::transaction::Transaction;

const STAGING_PREFIX: &str = ".bundlekit-staging-";

/// Assemble `spec` into `<target_root>/<bundle_name>.bundle`
pub fn assemble(spec: &BundleSpec) -> Result<AssembledBundle> {
    let plan = plan::plan(spec)?;
    let target_root = spec.target_root();
    tracing::info!(bundle = %plan.bundle_root.display(), "assembling bundle");

    let mut transaction = Transaction::new();
    if let Some(created) = first_missing_ancestor(target_root) {
        transaction.track_dir_created(created);
    }
    fs::create_dir_all(target_root).map_err(|e| fs_err::write_failed(target_root, &e))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(target_root)
        .map_err(|e| fs_err::write_failed(target_root, &e))?;
    tracing::debug!(staging = %staging.path().display(), "staging bundle");

    let steps = u64::try_from(plan.resources.len()).unwrap_or(u64::MAX);
    let progress = ProgressDisplay::new(steps.saturating_add(1));
    let resources = match stage::stage(&plan, staging.path(), &progress) {
        Ok(resources) => {
            progress.finish();
            resources
        }
        Err(e) => {
            progress.abandon();
            tracing::warn!(error = %e, "staging failed");
            return Err(e);
        }
    };

    transaction.displace(&plan.bundle_root)?;
    fs::rename(staging.path(), &plan.bundle_root)
        .map_err(|e| fs_err::write_failed(&plan.bundle_root, &e))?;
    transaction.track_dir_created(&plan.bundle_root);
    transaction.commit();

    tracing::info!(
        bundle = %plan.bundle_root.display(),
        resources = resources.len(),
        "bundle assembled"
    );
    Ok(AssembledBundle::new(plan.bundle_root, resources))
}
