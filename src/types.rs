//! Core types for the scanner.
//!
//! - `Severity` - Finding severity levels
//! - `CheckCode` - Check identifiers (e.g., "AWS001")
//! - `Range` - A location in a parsed source file
//! - `ScanResult` - A single finding produced by a check

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Severity levels for findings.
///
/// Ordered from most severe to least severe:
/// `Error > Warning > Info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Misconfigurations that expose infrastructure directly
    Error,
    /// Risky settings that should usually be fixed
    #[default]
    Warning,
    /// Hardening suggestions
    Info,
}

impl Severity {
    /// Parse a severity from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower rank is more severe, so reverse
        other.rank().cmp(&self.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A check code identifier (e.g., "AWS001", "GEN002").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckCode(pub String);

impl CheckCode {
    /// Create a new check code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The provider prefix of the code ("AWS", "AZU", "GCP", "GEN").
    pub fn provider(&self) -> &str {
        let end = self
            .0
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for CheckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CheckCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CheckCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for CheckCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CheckCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A location in a parsed file: filename plus an inclusive, 1-indexed line span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Range {
    pub filename: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl Range {
    /// Create a range, clamping so that `1 <= start_line <= end_line` holds.
    pub fn new(filename: impl Into<String>, start_line: u32, end_line: u32) -> Self {
        let start_line = start_line.max(1);
        Self {
            filename: filename.into(),
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    /// Whether the given line falls inside this range.
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Number of lines covered.
    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "{}:{}", self.filename, self.start_line)
        } else {
            write!(f, "{}:{}-{}", self.filename, self.start_line, self.end_line)
        }
    }
}

/// A finding produced by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanResult {
    /// The code of the check that produced this finding.
    pub code: CheckCode,
    /// A human-readable description of the problem.
    pub description: String,
    /// Where the problem is.
    pub range: Range,
    /// Optional note pinpointing the offending token on the first line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_annotation: Option<String>,
    /// Severity after config overrides.
    pub severity: Severity,
}

impl ScanResult {
    /// Create a new finding without an annotation.
    pub fn new(
        code: impl Into<CheckCode>,
        description: impl Into<String>,
        range: Range,
        severity: Severity,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            range,
            range_annotation: None,
            severity,
        }
    }

    /// Attach an annotation, replacing any previous one.
    pub fn annotate(&mut self, annotation: impl Into<String>) -> &mut Self {
        let annotation = annotation.into();
        self.range_annotation = if annotation.is_empty() {
            None
        } else {
            Some(annotation)
        };
        self
    }
}
