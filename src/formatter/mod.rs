//! Output formatters for scan results.
//!
//! - **Text**: problem listing with highlighted source context
//! - **JSON**: machine-readable array for CI pipelines

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{ContextLine, TextFormatter, context_window, highlight};

use crate::parser::Blocks;
use crate::types::ScanResult;
use std::io::Write;

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable listing (default)
    #[default]
    Text,
    /// JSON array
    Json,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "default" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Writes scan results.
pub trait Formatter {
    /// Format `results`. `sources` supplies file contents for code context.
    fn format<W: Write>(
        &self,
        results: &[ScanResult],
        sources: &Blocks,
        writer: &mut W,
    ) -> std::io::Result<()>;

    /// Format the results to a string.
    fn format_to_string(&self, results: &[ScanResult], sources: &Blocks) -> String {
        let mut buf = Vec::new();
        self.format(results, sources, &mut buf).unwrap_or_default();
        String::from_utf8(buf).unwrap_or_default()
    }
}

/// Write results in the given format.
pub fn format_results<W: Write>(
    results: &[ScanResult],
    sources: &Blocks,
    format: OutputFormat,
    colors: bool,
    writer: &mut W,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => TextFormatter::new(colors).format(results, sources, writer),
        OutputFormat::Json => JsonFormatter::new().format(results, sources, writer),
    }
}
