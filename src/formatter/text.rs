//! Human-readable formatter.
//!
//! Lists every problem with its code, description and location, followed by
//! the surrounding source lines. Offending lines are highlighted and the
//! annotation, if any, is printed next to the first of them.

use crate::formatter::Formatter;
use crate::parser::Blocks;
use crate::types::ScanResult;
use colored::Colorize;
use std::io::Write;
use std::ops::RangeInclusive;

/// Lines of context shown before and after a finding.
const CONTEXT_LINES: u32 = 3;

/// The lines to show around `start..=end` in a file of `line_count` lines.
///
/// Returns `None` when the window would be empty.
pub fn context_window(start: u32, end: u32, line_count: u32) -> Option<RangeInclusive<u32>> {
    let first = start.saturating_sub(CONTEXT_LINES).max(1);
    let last = end.saturating_add(CONTEXT_LINES).min(line_count);
    (first <= last).then_some(first..=last)
}

/// One line of highlighted context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextLine {
    pub number: u32,
    pub text: String,
    /// Inside the finding's range.
    pub offending: bool,
    /// Annotation shown after the text (first offending line only).
    pub annotation: Option<String>,
}

/// The context lines for a finding in `source`.
pub fn highlight(source: &str, result: &ScanResult) -> Vec<ContextLine> {
    let lines: Vec<&str> = source.lines().collect();
    let Some(window) = context_window(
        result.range.start_line,
        result.range.end_line,
        lines.len() as u32,
    ) else {
        return Vec::new();
    };

    window
        .filter_map(|number| {
            let text = lines.get(number as usize - 1)?;
            let offending = result.range.contains_line(number);
            let annotation = if number == result.range.start_line {
                result.range_annotation.clone()
            } else {
                None
            };
            Some(ContextLine {
                number,
                text: text.to_string(),
                offending,
                annotation,
            })
        })
        .collect()
}

/// Text output formatter.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Use colors in output.
    pub colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { colors: true }
    }
}

impl TextFormatter {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    pub fn no_color() -> Self {
        Self { colors: false }
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_context<W: Write>(&self, lines: &[ContextLine], writer: &mut W) -> std::io::Result<()> {
        for line in lines {
            let number = self.paint(&format!("{:>6}", line.number), |s| s.blue());
            if !line.offending {
                writeln!(writer, "  {} | {}", number, self.paint(&line.text, |s| s.yellow()))?;
                continue;
            }
            let text = self.paint(&line.text, |s| s.red().bold());
            match &line.annotation {
                Some(annotation) => writeln!(
                    writer,
                    "  {} | {}    {}",
                    number,
                    text,
                    self.paint(annotation, |s| s.blue().bold())
                )?,
                None => writeln!(writer, "  {} | {}", number, text)?,
            }
        }
        Ok(())
    }
}

impl Formatter for TextFormatter {
    fn format<W: Write>(
        &self,
        results: &[ScanResult],
        sources: &Blocks,
        writer: &mut W,
    ) -> std::io::Result<()> {
        if results.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.paint("No problems detected!", |s| s.green()))?;
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(
                &format!("{} potential problems detected:", results.len()),
                |s| s.red()
            )
        )?;
        writeln!(writer)?;

        for (index, result) in results.iter().enumerate() {
            writeln!(
                writer,
                "{}",
                self.paint(&format!("Problem {}", index + 1), |s| s.red().underline())
            )?;
            writeln!(writer)?;
            writeln!(
                writer,
                "  {}{}{} {} {}",
                self.paint("[", |s| s.blue()),
                result.code,
                self.paint("]", |s| s.blue()),
                self.paint(result.severity.as_str(), |s| s.dimmed()),
                result.description
            )?;
            writeln!(
                writer,
                "  {}",
                self.paint(
                    &format!(
                        "{}:{}-{}",
                        result.range.filename, result.range.start_line, result.range.end_line
                    ),
                    |s| s.blue()
                )
            )?;
            writeln!(writer)?;

            if let Some(source) = sources.source(&result.range.filename) {
                self.write_context(&highlight(source, result), writer)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
