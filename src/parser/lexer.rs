//! Lightweight token scan over raw HCL source.
//!
//! Finds comments and number literals while skipping quoted strings,
//! template interpolations and heredoc bodies. Used for ignore comments and
//! to keep out-of-range numbers from failing the parse.

use std::borrow::Cow;
use std::ops;

/// A comment, marker included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Comment<'a> {
    /// Line the comment starts on.
    pub line: u32,
    pub text: &'a str,
}

/// What a scan of one source found.
#[derive(Debug, Default)]
pub(crate) struct Lexed<'a> {
    pub comments: Vec<Comment<'a>>,
    /// Byte spans of number literals too large for an `f64`.
    pub overflowing_numbers: Vec<ops::Range<usize>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Inside `"..."`.
    Quoted,
    /// Inside `${ ... }` or `%{ ... }`, with the count of open inner braces.
    Template(u32),
}

/// Every comment in `source`.
pub(crate) fn comments(source: &str) -> Vec<Comment<'_>> {
    lex(source).comments
}

/// `source` with every out-of-range number literal replaced by a variable
/// reference of the same length, so it parses and resolves as unknown.
pub(crate) fn mask_overflowing_numbers(source: &str) -> Cow<'_, str> {
    let spans = lex(source).overflowing_numbers;
    if spans.is_empty() {
        return Cow::Borrowed(source);
    }
    let mut masked = String::with_capacity(source.len());
    let mut last = 0;
    for span in spans {
        masked.push_str(&source[last..span.start]);
        masked.extend(std::iter::repeat_n('x', span.len()));
        last = span.end;
    }
    masked.push_str(&source[last..]);
    Cow::Owned(masked)
}

pub(crate) fn lex(source: &str) -> Lexed<'_> {
    let bytes = source.as_bytes();
    let mut lexed = Lexed::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut line = 1u32;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        if stack.last() == Some(&Frame::Quoted) {
            match b {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' => {
                    stack.pop();
                }
                // `$${` and `%%{` are literal
                b'$' | b'%' if next == Some(b) && bytes.get(i + 2) == Some(&b'{') => {
                    i += 3;
                    continue;
                }
                b'$' | b'%' if next == Some(b'{') => {
                    stack.push(Frame::Template(0));
                    i += 2;
                    continue;
                }
                b'\n' => {
                    // Unterminated string; the parser reports it
                    stack.pop();
                    line += 1;
                }
                _ => {}
            }
            i += 1;
            continue;
        }

        match b {
            b'\n' => line += 1,
            b'"' => stack.push(Frame::Quoted),
            b'{' => {
                if let Some(Frame::Template(depth)) = stack.last_mut() {
                    *depth += 1;
                }
            }
            b'}' => match stack.last_mut() {
                Some(Frame::Template(0)) => {
                    stack.pop();
                }
                Some(Frame::Template(depth)) => *depth -= 1,
                _ => {}
            },
            b'#' => {
                let end = line_end(bytes, i);
                lexed.comments.push(Comment { line, text: &source[i..end] });
                i = end;
                continue;
            }
            b'/' if next == Some(b'/') => {
                let end = line_end(bytes, i);
                lexed.comments.push(Comment { line, text: &source[i..end] });
                i = end;
                continue;
            }
            b'/' if next == Some(b'*') => {
                let end = source[i + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |offset| i + 2 + offset + 2);
                let text = &source[i..end];
                lexed.comments.push(Comment { line, text });
                line += text.matches('\n').count() as u32;
                i = end;
                continue;
            }
            b'<' if next == Some(b'<') => {
                if let Some((end, lines)) = heredoc_end(source, i) {
                    line += lines;
                    i = end;
                    continue;
                }
            }
            b'0'..=b'9' if !inside_token(bytes, i) => {
                let end = number_end(bytes, i);
                let overflows = source[i..end]
                    .parse::<f64>()
                    .is_ok_and(|n| n.is_infinite());
                if overflows {
                    lexed.overflowing_numbers.push(i..end);
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    lexed
}

/// Whether the digit at `i` continues an identifier or traversal.
fn inside_token(bytes: &[u8], i: usize) -> bool {
    let word = |b: &u8| b.is_ascii_alphanumeric() || *b == b'_';
    match i.checked_sub(1).map(|p| bytes[p]) {
        Some(b'.') => true,
        // `foo-1` is an identifier, `= -1` is a negative number
        Some(b'-') => i.checked_sub(2).and_then(|p| bytes.get(p)).is_some_and(word),
        Some(b) => word(&b),
        None => false,
    }
}

fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

/// End of the number literal starting at `start`: digits, an optional
/// fraction and an optional exponent.
fn number_end(bytes: &[u8], start: usize) -> usize {
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |offset| from + offset)
    };

    let mut end = digits(start);
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = digits(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            end = digits(exponent);
        }
    }
    end
}

/// For a heredoc opening at `start` (`<<EOF` or `<<-EOF`), the offset of the
/// newline that ends its closing marker line and the newlines skipped.
fn heredoc_end(source: &str, start: usize) -> Option<(usize, u32)> {
    let rest = &source[start + 2..];
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    let marker_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    let marker = &rest[..marker_len];
    if !marker.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return None;
    }
    let header_end = rest[marker_len..].find('\n')?;
    if !rest[marker_len..marker_len + header_end].trim().is_empty() {
        return None;
    }

    let body_start = source.len() - rest.len() + marker_len + header_end + 1;
    let mut offset = body_start;
    let mut lines = 1u32;
    for body_line in source[body_start..].split_inclusive('\n') {
        if body_line.trim() == marker {
            let end = offset + body_line.trim_end_matches(['\r', '\n']).len();
            return Some((end, lines));
        }
        offset += body_line.len();
        lines += 1;
    }
    // No closing marker; the parser reports it
    None
}
