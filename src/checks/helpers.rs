//! Predicates shared by the built-in checks.
//!
//! Every helper treats [`Value::Unresolved`] as "cannot determine" and never
//! reports it as a match.

use crate::error::CheckError;
use crate::parser::{Attribute, BlockRef, Value};
use once_cell::sync::Lazy;
use regex::Regex;

static SENSITIVE_NAME: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:.*[_-])?(?:password|passwd|secret|secret_key|private_key|api_key|access_key|token|auth_token|credentials?)$",
    )
    .ok()
});

/// Whether an attribute or variable name looks like it holds a credential.
pub fn is_sensitive_name(name: &str) -> bool {
    SENSITIVE_NAME
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name))
}

/// Whether a CIDR covers every address (`0.0.0.0/0`, `::/0`, ...).
pub fn is_open_cidr(cidr: &str) -> bool {
    cidr.trim().ends_with("/0")
}

/// A boolean attribute value. Terraform also accepts `"true"`/`"false"` strings.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// The attribute if it is set to a literal `true`.
pub fn attribute_is_true<'a>(block: BlockRef<'a>, name: &str) -> Option<&'a Attribute> {
    block
        .attribute(name)
        .filter(|attr| as_bool(&attr.value) == Some(true))
}

/// The attribute if it is set to a literal `false`.
pub fn attribute_is_false<'a>(block: BlockRef<'a>, name: &str) -> Option<&'a Attribute> {
    block
        .attribute(name)
        .filter(|attr| as_bool(&attr.value) == Some(false))
}

/// Whether a literal string attribute equals one of `candidates`, ignoring case.
pub fn string_in(attr: &Attribute, candidates: &[&str]) -> bool {
    attr.value
        .as_str()
        .is_some_and(|s| candidates.iter().any(|c| c.eq_ignore_ascii_case(s)))
}

/// The literal strings of a list attribute.
///
/// Unresolved lists and unresolved items are skipped. Anything that is not a
/// list of strings is a type mismatch.
pub fn string_list(attr: &Attribute) -> Result<Vec<&str>, CheckError> {
    let items = match &attr.value {
        Value::List(items) => items,
        Value::Unresolved => return Ok(Vec::new()),
        other => return Err(type_mismatch(attr, "list", other)),
    };

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => strings.push(s.as_str()),
            Value::Unresolved => {}
            other => return Err(type_mismatch(attr, "list of strings", other)),
        }
    }
    Ok(strings)
}

/// The first CIDR attribute among `names` holding an open range.
pub fn open_cidr_attribute<'a>(
    block: BlockRef<'a>,
    names: &[&str],
) -> Result<Option<&'a Attribute>, CheckError> {
    for name in names {
        let Some(attr) = block.attribute(name) else {
            continue;
        };
        if string_list(attr)?.into_iter().any(is_open_cidr) {
            return Ok(Some(attr));
        }
    }
    Ok(None)
}

/// Whether the attribute is missing or a literal empty string.
///
/// Returns `Some(None)` when missing, `Some(Some(attr))` when empty and `None`
/// when set to something else (including an unresolved expression).
pub fn missing_or_empty<'a>(block: BlockRef<'a>, name: &str) -> Option<Option<&'a Attribute>> {
    match block.attribute(name) {
        None => Some(None),
        Some(attr) if attr.value.as_str().is_some_and(|s| s.trim().is_empty()) => Some(Some(attr)),
        Some(_) => None,
    }
}

/// A literal, non-empty string value.
pub fn literal_string(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// The label at `index`, or a `MissingLabel` error.
pub fn required_label<'a>(block: BlockRef<'a>, index: usize) -> Result<&'a str, CheckError> {
    block.label(index).ok_or_else(|| CheckError::MissingLabel {
        kind: block.kind().to_string(),
        index,
    })
}

pub fn type_mismatch(attr: &Attribute, expected: &'static str, found: &Value) -> CheckError {
    CheckError::TypeMismatch {
        attribute: attr.name.clone(),
        expected,
        found: found.type_name(),
    }
}
