//! # tfsec
//!
//! A static security scanner for Terraform code.
//!
//! Parses every `.tf` file of a directory into a tree of blocks, runs a
//! registry of security checks over the tree and reports each problem with
//! its location and surrounding source.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tfsec::{Registry, Scanner, parse_directory};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let blocks = parse_directory(Path::new("./infra"))?;
//! let registry = Registry::with_builtin_checks()?;
//! for result in Scanner::new(&registry).scan(&blocks) {
//!     println!("{} {} {}", result.code, result.range, result.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod pragma;
pub mod scan;
pub mod types;

pub use checks::{Check, Registry};
pub use config::{ScanConfig, load_config};
pub use error::{CheckError, ConfigError, ParseError, RegistryError, Result, TfsecError};
pub use formatter::{Formatter, JsonFormatter, OutputFormat, TextFormatter, format_results};
pub use parser::{Attribute, Block, BlockRef, Blocks, Parser, Value, parse_directory};
pub use scan::Scanner;
pub use types::{CheckCode, Range, ScanResult, Severity};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
