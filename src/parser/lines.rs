//! Byte offset to line number mapping.

use crate::types::Range;
use std::ops;

/// Maps byte offsets in a source file to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts.
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            starts,
            len: source.len(),
        }
    }

    /// The 1-based line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len);
        let line = match self.starts.binary_search(&offset) {
            Ok(index) => index + 1,
            Err(index) => index,
        };
        line as u32
    }

    /// Number of lines, not counting an empty line after a trailing newline.
    pub fn line_count(&self) -> u32 {
        let trailing_newline = self.starts.len() > 1 && self.starts.last() == Some(&self.len);
        let count = if trailing_newline {
            self.starts.len() - 1
        } else {
            self.starts.len()
        };
        count as u32
    }

    /// Convert a half-open byte span into an inclusive line range.
    pub fn range(&self, filename: &str, span: &ops::Range<usize>) -> Range {
        let start = self.line_of(span.start);
        let last_byte = if span.end > span.start {
            span.end - 1
        } else {
            span.start
        };
        Range::new(filename, start, self.line_of(last_byte))
    }

    /// A range covering the whole file.
    pub fn whole_file(&self, filename: &str) -> Range {
        Range::new(filename, 1, self.line_count())
    }
}
