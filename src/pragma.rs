//! Inline ignore comments.
//!
//! A comment such as `# tfsec:ignore:AWS001` suppresses findings of that code
//! starting on the comment's line (trailing comment) or on the line after it.
//! Several codes may be listed with commas, and `*` matches every code.
//! `#`, `//` and `/* */` comments are recognised. Text inside quoted strings,
//! template interpolations and heredocs is never treated as a comment.

use crate::parser::lexer::comments;
use crate::types::{CheckCode, ScanResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

static IGNORE_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?:#|//|/\*)\s*tfsec:ignore:([A-Za-z0-9_*]+(?:\s*,\s*[A-Za-z0-9_*]+)*)").ok()
});

/// Codes ignored on a given line of a given file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineIgnores {
    by_line: BTreeMap<(String, u32), BTreeSet<String>>,
}

impl InlineIgnores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a file's comments for ignore markers.
    pub fn extract(filename: &str, source: &str) -> Self {
        let mut ignores = Self::new();
        let Some(pattern) = IGNORE_PATTERN.as_ref() else {
            return ignores;
        };
        for comment in comments(source) {
            for captures in pattern.captures_iter(comment.text) {
                let Some(codes) = captures.get(1) else {
                    continue;
                };
                for code in codes.as_str().split(',').map(str::trim) {
                    if !code.is_empty() {
                        ignores.insert(filename, comment.line, code);
                    }
                }
            }
        }
        ignores
    }

    pub fn insert(&mut self, filename: &str, line: u32, code: &str) {
        self.by_line
            .entry((filename.to_string(), line))
            .or_default()
            .insert(code.to_string());
    }

    pub fn extend(&mut self, other: InlineIgnores) {
        for (key, codes) in other.by_line {
            self.by_line.entry(key).or_default().extend(codes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Whether `code` is ignored for a finding starting at `line` of `filename`.
    pub fn is_ignored(&self, filename: &str, line: u32, code: &CheckCode) -> bool {
        let matches = |comment_line: u32| {
            self.by_line
                .get(&(filename.to_string(), comment_line))
                .is_some_and(|codes| codes.contains("*") || codes.contains(code.as_str()))
        };

        // Trailing comment on the same line, or a comment on the line before
        matches(line) || (line > 1 && matches(line - 1))
    }

    /// Whether a finding is suppressed by an inline comment.
    pub fn suppresses(&self, result: &ScanResult) -> bool {
        self.is_ignored(&result.range.filename, result.range.start_line, &result.code)
    }
}
