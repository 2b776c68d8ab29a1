//! Check framework and the built-in checks.
//!
//! A check inspects one block at a time and reports findings through a
//! [`Report`]. Most checks are built with [`block_check`], which pairs a
//! [`Target`] filter with a closure:
//!
//! ```ignore
//! pub fn check() -> BlockCheck<impl Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync> {
//!     block_check("AWS015", Severity::Warning, "SQS queue is not encrypted",
//!         Target::resources(&["aws_sqs_queue"]),
//!         |report, block| { /* ... */ Ok(()) })
//! }
//! ```
//!
//! Checks are registered explicitly in a [`Registry`]; see
//! [`Registry::with_builtin_checks`].

pub mod helpers;

pub mod aws001;
pub mod aws002;
pub mod aws003;
pub mod aws004;
pub mod aws005;
pub mod aws006;
pub mod aws007;
pub mod aws008;
pub mod aws009;
pub mod aws010;
pub mod aws011;
pub mod aws012;
pub mod aws013;
pub mod aws014;
pub mod aws015;
pub mod aws016;
pub mod aws017;
pub mod aws018;
pub mod azu001;
pub mod azu002;
pub mod gcp001;
pub mod gcp003;
pub mod gen001;
pub mod gen002;

use crate::error::{CheckError, RegistryError};
use crate::parser::{Attribute, BlockRef};
use crate::types::{CheckCode, ScanResult, Severity};
use std::collections::BTreeSet;

/// A security check run against every block.
pub trait Check: Send + Sync {
    /// Unique code, e.g. `AWS001`.
    fn code(&self) -> &CheckCode;

    /// One-line summary of what the check looks for.
    fn description(&self) -> &str;

    fn default_severity(&self) -> Severity;

    /// Inspect one block. Blocks the check does not target yield no findings.
    fn apply(&self, block: BlockRef<'_>) -> Result<Vec<ScanResult>, CheckError>;
}

/// Which blocks a [`BlockCheck`] looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Every block.
    Any,
    /// Blocks of the given kind at any depth, e.g. `ingress`.
    Block(&'static str),
    /// `resource` blocks of one of the given types.
    Resources(&'static [&'static str]),
}

impl Target {
    pub const fn resources(types: &'static [&'static str]) -> Self {
        Self::Resources(types)
    }

    pub fn matches(&self, block: BlockRef<'_>) -> bool {
        match self {
            Self::Any => true,
            Self::Block(kind) => block.kind() == *kind,
            Self::Resources(types) => block.is_resource(types),
        }
    }
}

/// Collects the findings of one check on one block.
pub struct Report<'c> {
    code: &'c CheckCode,
    severity: Severity,
    results: Vec<ScanResult>,
}

impl<'c> Report<'c> {
    pub fn new(code: &'c CheckCode, severity: Severity) -> Self {
        Self {
            code,
            severity,
            results: Vec::new(),
        }
    }

    /// Report a finding covering a whole block.
    pub fn at_block(
        &mut self,
        block: BlockRef<'_>,
        description: impl Into<String>,
    ) -> &mut ScanResult {
        self.push(ScanResult::new(
            self.code.clone(),
            description,
            block.range().clone(),
            self.severity,
        ))
    }

    /// Report a finding at an attribute, annotated with its `name = value`.
    pub fn at_attribute(
        &mut self,
        attribute: &Attribute,
        description: impl Into<String>,
    ) -> &mut ScanResult {
        let result = self.push(ScanResult::new(
            self.code.clone(),
            description,
            attribute.range.clone(),
            self.severity,
        ));
        result.annotate(attribute.describe());
        result
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<ScanResult> {
        self.results
    }

    fn push(&mut self, result: ScanResult) -> &mut ScanResult {
        self.results.push(result);
        let last = self.results.len() - 1;
        &mut self.results[last]
    }
}

/// A check made of a target filter and a reporting closure.
pub struct BlockCheck<F>
where
    F: Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync,
{
    code: CheckCode,
    severity: Severity,
    description: String,
    target: Target,
    check_fn: F,
}

impl<F> BlockCheck<F>
where
    F: Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync,
{
    pub fn new(
        code: impl Into<CheckCode>,
        severity: Severity,
        description: impl Into<String>,
        target: Target,
        check_fn: F,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            description: description.into(),
            target,
            check_fn,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }
}

impl<F> Check for BlockCheck<F>
where
    F: Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync,
{
    fn code(&self) -> &CheckCode {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn apply(&self, block: BlockRef<'_>) -> Result<Vec<ScanResult>, CheckError> {
        if !self.target.matches(block) {
            return Ok(Vec::new());
        }
        let mut report = Report::new(&self.code, self.severity);
        (self.check_fn)(&mut report, block)?;
        Ok(report.into_results())
    }
}

/// Create a check from a target filter and a reporting closure.
pub fn block_check<F>(
    code: impl Into<CheckCode>,
    severity: Severity,
    description: impl Into<String>,
    target: Target,
    check_fn: F,
) -> BlockCheck<F>
where
    F: Fn(&mut Report<'_>, BlockRef<'_>) -> Result<(), CheckError> + Send + Sync,
{
    BlockCheck::new(code, severity, description, target, check_fn)
}

/// Ordered collection of checks with unique codes.
#[derive(Default)]
pub struct Registry {
    checks: Vec<Box<dyn Check>>,
    codes: BTreeSet<CheckCode>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in check.
    pub fn with_builtin_checks() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for check in builtin_checks() {
            registry.register_boxed(check)?;
        }
        Ok(registry)
    }

    /// Add a check. Fails if its code is already registered.
    pub fn register(&mut self, check: impl Check + 'static) -> Result<(), RegistryError> {
        self.register_boxed(Box::new(check))
    }

    pub fn register_boxed(&mut self, check: Box<dyn Check>) -> Result<(), RegistryError> {
        if !self.codes.insert(check.code().clone()) {
            return Err(RegistryError::DuplicateCode(check.code().clone()));
        }
        self.checks.push(check);
        Ok(())
    }

    /// Checks in registration order.
    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    pub fn get(&self, code: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|c| c.code() == code)
            .map(|c| c.as_ref())
    }

    pub fn contains(&self, code: &CheckCode) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("codes", &self.checks.iter().map(|c| c.code()).collect::<Vec<_>>())
            .finish()
    }
}

/// Every built-in check, in registration order.
pub fn builtin_checks() -> Vec<Box<dyn Check>> {
    vec![
        // AWS
        Box::new(aws001::check()),
        Box::new(aws002::check()),
        Box::new(aws003::check()),
        Box::new(aws004::check()),
        Box::new(aws005::check()),
        Box::new(aws006::check()),
        Box::new(aws007::check()),
        Box::new(aws008::check()),
        Box::new(aws009::check()),
        Box::new(aws010::check()),
        Box::new(aws011::check()),
        Box::new(aws012::check()),
        Box::new(aws013::check()),
        Box::new(aws014::check()),
        Box::new(aws015::check()),
        Box::new(aws016::check()),
        Box::new(aws017::check()),
        Box::new(aws018::check()),
        // Azure
        Box::new(azu001::check()),
        Box::new(azu002::check()),
        // Google Cloud
        Box::new(gcp001::check()),
        Box::new(gcp003::check()),
        // General
        Box::new(gen001::check()),
        Box::new(gen002::check()),
    ]
}

/// Run one check over every block of a source snippet.
#[cfg(test)]
pub(crate) fn run_check(check: &dyn Check, source: &str) -> Vec<ScanResult> {
    let blocks = crate::parser::parse_source("main.tf", source).unwrap();
    blocks
        .walk()
        .into_iter()
        .filter_map(|block| check.apply(block).ok())
        .flatten()
        .collect()
}

/// Errors a check raises over a source snippet.
#[cfg(test)]
pub(crate) fn check_errors(check: &dyn Check, source: &str) -> Vec<CheckError> {
    let blocks = crate::parser::parse_source("main.tf", source).unwrap();
    blocks
        .walk()
        .into_iter()
        .filter_map(|block| check.apply(block).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(code: &'static str) -> impl Check {
        block_check(code, Severity::Info, "always fires", Target::Any, |report, block| {
            report.at_block(block, "found");
            Ok(())
        })
    }

    #[test]
    fn test_builtin_registry() {
        let registry = Registry::with_builtin_checks().unwrap();
        assert_eq!(registry.len(), 24);
        assert!(registry.get("AWS001").is_some());
        assert!(registry.get("GEN002").is_some());
        assert!(registry.get("AWS999").is_none());

        let codes: Vec<_> = registry.checks().iter().map(|c| c.code().to_string()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_builtin_descriptions() {
        let registry = Registry::with_builtin_checks().unwrap();
        for check in registry.checks() {
            assert!(!check.description().is_empty(), "{}", check.code());
        }
    }

    #[test]
    fn test_duplicate_code_is_rejected() {
        let mut registry = Registry::new();
        registry.register(always("X001")).unwrap();
        let err = registry.register(always("X001")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCode("X001".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_target_filtering() {
        let check = block_check(
            "X002",
            Severity::Warning,
            "bucket",
            Target::resources(&["aws_s3_bucket"]),
            |report, block| {
                report.at_block(block, "bucket found");
                Ok(())
            },
        );
        let results = run_check(
            &check,
            r#"
resource "aws_s3_bucket" "a" {}
resource "aws_sqs_queue" "b" {}
data "aws_s3_bucket" "c" {}
"#,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].range.start_line, 2);
    }

    #[test]
    fn test_attribute_findings_are_annotated() {
        let check = block_check(
            "X003",
            Severity::Error,
            "acl",
            Target::Any,
            |report, block| {
                if let Some(acl) = block.attribute("acl") {
                    report.at_attribute(acl, "acl set");
                }
                Ok(())
            },
        );
        let results = run_check(&check, "resource \"a\" \"b\" {\n  acl = \"private\"\n}\n");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].range.start_line, 2);
        assert_eq!(
            results[0].range_annotation.as_deref(),
            Some("acl = \"private\"")
        );
        assert_eq!(results[0].severity, Severity::Error);
    }
}
