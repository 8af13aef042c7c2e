//! Validation report types

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Outcome of a single structural check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Ordered results of validating one bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    bundle: PathBuf,
    checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn new(bundle: impl Into<PathBuf>, checks: Vec<CheckResult>) -> Self {
        Self {
            bundle: bundle.into(),
            checks,
        }
    }

    pub fn bundle(&self) -> &Path {
        &self.bundle
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn is_ok(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
