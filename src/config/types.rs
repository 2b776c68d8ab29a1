use crate::types::{CheckCode, ScanResult, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Scan settings.
///
/// Built programmatically with the builder methods or loaded from a
/// `.tfsec/config.{yml,yaml,json,toml}` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Checks to skip entirely.
    pub exclude: BTreeSet<CheckCode>,
    /// Per-check severity replacing the check's default.
    pub severity_overrides: BTreeMap<CheckCode, Severity>,
    /// Drop findings less severe than this.
    pub minimum_severity: Option<Severity>,
    /// Glob patterns of files the parser skips.
    pub exclude_paths: Vec<String>,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Ignore `tfsec:ignore` comments.
    pub disable_inline_ignores: bool,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_excluded(&self, code: &CheckCode) -> bool {
        self.exclude.contains(code)
    }

    /// Severity after overrides.
    pub fn effective_severity(&self, code: &CheckCode, default: Severity) -> Severity {
        self.severity_overrides.get(code).copied().unwrap_or(default)
    }

    /// Apply severity overrides and the minimum severity to a finding.
    /// Returns `None` when the finding should be dropped.
    pub fn apply(&self, mut result: ScanResult) -> Option<ScanResult> {
        if self.is_excluded(&result.code) {
            return None;
        }
        result.severity = self.effective_severity(&result.code, result.severity);
        match self.minimum_severity {
            Some(minimum) if result.severity < minimum => None,
            _ => Some(result),
        }
    }

    /// Builder method to skip a check.
    pub fn exclude(mut self, code: impl Into<CheckCode>) -> Self {
        self.exclude.insert(code.into());
        self
    }

    /// Builder method to override a check's severity.
    pub fn with_severity(mut self, code: impl Into<CheckCode>, severity: Severity) -> Self {
        self.severity_overrides.insert(code.into(), severity);
        self
    }

    /// Builder method to set the minimum reported severity.
    pub fn with_minimum_severity(mut self, severity: Severity) -> Self {
        self.minimum_severity = Some(severity);
        self
    }

    /// Builder method to skip files matching a glob.
    pub fn exclude_path(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_paths.push(pattern.into());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn disable_inline_ignores(mut self, disable: bool) -> Self {
        self.disable_inline_ignores = disable;
        self
    }
}
