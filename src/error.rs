//! Error types for parsing, checking, registry construction and configuration.

use crate::types::CheckCode;
use thiserror::Error;

/// Errors raised while reading and parsing a directory. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The scan target is not a directory.
    #[error("{path}: not a directory")]
    NotADirectory { path: String },

    /// A directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid HCL.
    #[error("syntax error in {file}: {message}")]
    Syntax { file: String, message: String },

    /// An attribute name appears twice in one block.
    #[error("{file}:{line}: attribute '{name}' redefined (first defined on line {first_line})")]
    DuplicateAttribute {
        file: String,
        name: String,
        line: u32,
        first_line: u32,
    },
}

/// A check could not reason about the block it was given.
///
/// The scanner absorbs these per block/check pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("attribute '{attribute}' is a {found}, expected a {expected}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{kind}' block has no label at position {index}")]
    MissingLabel { kind: String, index: usize },

    #[error("attribute '{attribute}' could not be decoded: {message}")]
    MalformedValue { attribute: String, message: String },
}

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("check code {0} is registered more than once")]
    DuplicateCode(CheckCode),
}

/// Config file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("unsupported config file format: {0} (expected .yml, .yaml, .json or .toml)")]
    UnsupportedFormat(String),

    #[error("invalid exclude_paths pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Top-level error for library consumers.
#[derive(Debug, Error)]
pub enum TfsecError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, TfsecError>;
