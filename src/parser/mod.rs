//! Terraform configuration parser.
//!
//! Turns a directory of `.tf` files into a range-annotated tree of blocks and
//! attributes. Files are read and parsed in parallel and assembled in sorted
//! path order, so the output does not depend on scheduling.

pub mod block;
pub mod hcl;
pub(crate) mod lexer;
pub mod lines;
pub mod value;

pub use block::{Attribute, Block, BlockId, BlockRef, Blocks};
pub use hcl::parse_source;
pub use value::{Value, resolve};

use crate::config::ScanConfig;
use crate::error::{ConfigError, ParseError};
use glob::Pattern;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// File extension of eligible files.
pub const TERRAFORM_EXTENSION: &str = "tf";

/// Directory parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    recursive: bool,
    exclude: Vec<Pattern>,
}

impl Parser {
    /// A parser that reads only the top level of the directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser from the file-selection settings of a config.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ConfigError> {
        let mut parser = Self::new().recursive(config.recursive);
        for pattern in &config.exclude_paths {
            parser = parser.exclude(pattern)?;
        }
        Ok(parser)
    }

    /// Descend into subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Skip files whose path (relative to the scanned directory) matches a glob.
    pub fn exclude(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let compiled = Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(compiled);
        Ok(self)
    }

    /// Parse every eligible file in `path`.
    ///
    /// Any unreadable or malformed file aborts the call. A directory without
    /// eligible files yields an empty collection.
    pub fn parse_directory(&self, path: &Path) -> Result<Blocks, ParseError> {
        if !path.is_dir() {
            return Err(ParseError::NotADirectory {
                path: path.display().to_string(),
            });
        }

        let files = self.collect_files(path)?;
        log::debug!("found {} terraform files in {}", files.len(), path.display());

        let parsed: Vec<Result<Blocks, ParseError>> =
            files.par_iter().map(|file| parse_file(file)).collect();

        let mut blocks = Blocks::new();
        for file_blocks in parsed {
            blocks.append(file_blocks?);
        }
        Ok(blocks)
    }

    /// Eligible files under `root`, sorted lexicographically by path string.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>, ParseError> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| ParseError::Io {
                path: e
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string(),
                source: std::io::Error::from(e),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TERRAFORM_EXTENSION) {
                continue;
            }
            if self.is_excluded(root, path) {
                log::debug!("skipping excluded file {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
        files.sort_by_cached_key(|path| path.to_string_lossy().into_owned());
        Ok(files)
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

/// Parse `path` with a default, non-recursive parser.
pub fn parse_directory(path: &Path) -> Result<Blocks, ParseError> {
    Parser::new().parse_directory(path)
}

fn parse_file(path: &Path) -> Result<Blocks, ParseError> {
    let filename = path.display().to_string();
    log::debug!("parsing {}", filename);
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: filename.clone(),
        source,
    })?;
    parse_source(&filename, &source)
}

/// Hidden directories and the `.terraform` module cache are never scanned.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_files_in_lexicographic_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.tf", "variable \"b\" {}\n");
        write(dir.path(), "a.tf", "variable \"a\" {}\n");
        write(dir.path(), "c.tf", "variable \"c\" {}\n");

        let blocks = parse_directory(dir.path()).unwrap();
        let names: Vec<_> = blocks.roots().map(|b| b.full_name()).collect();
        assert_eq!(names, vec!["variable.a", "variable.b", "variable.c"]);
    }

    #[test]
    fn test_only_tf_files_are_eligible() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.tf", "variable \"a\" {}\n");
        write(dir.path(), "notes.txt", "not { hcl");
        write(dir.path(), "vars.tfvars", "region = \"eu\"\n");
        write(dir.path(), "main.tf.json", "{}");

        let blocks = parse_directory(dir.path()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.files().count(), 1);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let blocks = parse_directory(dir.path()).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_not_a_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.tf", "");
        let err = parse_directory(&dir.path().join("main.tf")).unwrap_err();
        assert!(matches!(err, ParseError::NotADirectory { .. }));

        let err = parse_directory(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ParseError::NotADirectory { .. }));
    }

    #[test]
    fn test_malformed_file_aborts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.tf", "variable \"a\" {}\n");
        write(dir.path(), "bad.tf", "resource \"x\" \"y\" {\n");

        let err = parse_directory(dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.tf"));
    }

    #[test]
    fn test_recursion_and_skipped_dirs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.tf", "variable \"root\" {}\n");
        write(dir.path(), "modules/net/main.tf", "variable \"nested\" {}\n");
        write(dir.path(), ".terraform/modules/x/main.tf", "variable \"cached\" {}\n");
        write(dir.path(), ".hidden/main.tf", "variable \"hidden\" {}\n");

        let flat = Parser::new().parse_directory(dir.path()).unwrap();
        assert_eq!(flat.len(), 1);

        let deep = Parser::new().recursive(true).parse_directory(dir.path()).unwrap();
        let names: Vec<_> = deep.roots().map(|b| b.full_name()).collect();
        assert_eq!(names, vec!["variable.root", "variable.nested"]);
    }

    #[test]
    fn test_recursive_order_follows_path_strings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/x.tf", "variable \"slash\" {}\n");
        write(dir.path(), "a-b/x.tf", "variable \"dash\" {}\n");

        let parser = Parser::new().recursive(true);
        let files = parser.collect_files(dir.path()).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(relative, vec!["a-b/x.tf", "a/x.tf"]);

        let blocks = parser.parse_directory(dir.path()).unwrap();
        let names: Vec<_> = blocks.roots().map(|b| b.full_name()).collect();
        assert_eq!(names, vec!["variable.dash", "variable.slash"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.tf", "variable \"a\" {}\n");
        write(dir.path(), "generated_x.tf", "variable \"b\" {}\n");

        let parser = Parser::new().exclude("generated_*.tf").unwrap();
        let blocks = parser.parse_directory(dir.path()).unwrap();
        assert_eq!(blocks.len(), 1);

        assert!(matches!(
            Parser::new().exclude("[").unwrap_err(),
            ConfigError::InvalidPattern { .. }
        ));
    }
}
