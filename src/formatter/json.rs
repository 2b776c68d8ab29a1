//! JSON formatter.
//!
//! Writes the findings as a single JSON array. An empty result set is `[]`.

use crate::formatter::Formatter;
use crate::parser::Blocks;
use crate::types::ScanResult;
use std::io::Write;

/// JSON output formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Formatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        results: &[ScanResult],
        _sources: &Blocks,
        writer: &mut W,
    ) -> std::io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, results)?;
        } else {
            serde_json::to_writer(&mut *writer, results)?;
        }
        writeln!(writer)
    }
}
