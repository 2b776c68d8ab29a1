use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tfsec::checks::builtin_checks;
use tfsec::{
    JsonFormatter, Formatter, ParseError, Parser, Registry, ScanConfig, ScanResult, Scanner,
    parse_directory,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/terraform")
        .join(name)
}

fn scan(dir: &Path) -> Vec<ScanResult> {
    let blocks = parse_directory(dir).unwrap();
    let registry = Registry::with_builtin_checks().unwrap();
    Scanner::new(&registry).scan(&blocks)
}

fn write_tf(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn codes(results: &[ScanResult]) -> Vec<String> {
    results.iter().map(|r| r.code.to_string()).collect()
}

#[test]
fn test_public_acl_is_reported_once() {
    let results = scan(&fixture("public_bucket"));

    assert_eq!(codes(&results), vec!["AWS001"]);
    let finding = &results[0];
    assert!(finding.range.filename.ends_with("main.tf"));
    assert_eq!(finding.range.start_line, 3);
    assert_eq!(finding.range_annotation.as_deref(), Some("acl = \"public-read\""));
}

#[test]
fn test_private_or_missing_acl_is_not_reported() {
    let temp = TempDir::new().unwrap();
    write_tf(
        temp.path(),
        "main.tf",
        r#"
resource "aws_s3_bucket" "private" {
  acl = "private"
}

resource "aws_s3_bucket" "default" {
  bucket = "default"
}
"#,
    );

    let results = scan(temp.path());
    assert!(!results.iter().any(|r| r.code == "AWS001"));
}

#[test]
fn test_unresolved_acl_is_not_reported() {
    let temp = TempDir::new().unwrap();
    write_tf(
        temp.path(),
        "main.tf",
        "resource \"aws_s3_bucket\" \"b\" {\n  acl = var.acl\n}\n",
    );

    let results = scan(temp.path());
    assert!(!results.iter().any(|r| r.code == "AWS001"));
}

#[test]
fn test_syntax_error_names_the_file() {
    let temp = TempDir::new().unwrap();
    write_tf(
        temp.path(),
        "good.tf",
        "resource \"aws_s3_bucket\" \"b\" {\n  acl = \"public-read\"\n}\n",
    );
    write_tf(temp.path(), "broken.tf", "resource \"aws_s3_bucket\" \"b\" {\n  acl = \"private\"\n");

    let err = parse_directory(temp.path()).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    assert!(err.to_string().contains("broken.tf"));
}

#[test]
fn test_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.tf");
    fs::write(&file, "").unwrap();

    assert!(matches!(
        parse_directory(&file),
        Err(ParseError::NotADirectory { .. })
    ));
    assert!(matches!(
        parse_directory(&temp.path().join("missing")),
        Err(ParseError::NotADirectory { .. })
    ));
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();
    let blocks = parse_directory(temp.path()).unwrap();
    assert!(blocks.is_empty());

    let registry = Registry::with_builtin_checks().unwrap();
    let results = Scanner::new(&registry).scan(&blocks);
    assert!(results.is_empty());
    assert_eq!(
        JsonFormatter::new().format_to_string(&results, &blocks).trim(),
        "[]"
    );
}

#[test]
fn test_clean_fixture() {
    assert!(scan(&fixture("clean")).is_empty());
}

#[test]
fn test_mixed_fixture() {
    let results = scan(&fixture("mixed"));
    assert_eq!(
        codes(&results),
        vec!["AWS002", "AWS004", "AWS008", "AWS011", "AWS017", "AWS018", "GCP003", "GEN001"]
    );

    let http = results.iter().find(|r| r.code == "AWS004").unwrap();
    assert!(http.range.filename.ends_with("network.tf"));
    assert_eq!(http.range.start_line, 36);
}

#[test]
fn test_recursive_parser_includes_modules() {
    let parser = Parser::new().recursive(true);
    let blocks = parser.parse_directory(&fixture("mixed")).unwrap();
    let registry = Registry::with_builtin_checks().unwrap();
    let results = Scanner::new(&registry).scan(&blocks);

    let bastion: Vec<_> = results.iter().filter(|r| r.code == "AWS012").collect();
    assert_eq!(bastion.len(), 1);
    assert!(bastion[0].range.filename.contains("modules"));
}

#[test]
fn test_results_are_deterministic() {
    let first = scan(&fixture("mixed"));
    let second = scan(&fixture("mixed"));
    assert_eq!(first, second);
}

#[test]
fn test_ranges_are_valid() {
    let blocks = Parser::new()
        .recursive(true)
        .parse_directory(&fixture("mixed"))
        .unwrap();
    let registry = Registry::with_builtin_checks().unwrap();
    let results = Scanner::new(&registry).scan(&blocks);
    assert!(!results.is_empty());

    let files: Vec<&str> = blocks.files().collect();
    for result in &results {
        assert!(result.range.start_line >= 1, "{:?}", result);
        assert!(result.range.start_line <= result.range.end_line, "{:?}", result);
        assert!(files.contains(&result.range.filename.as_str()), "{:?}", result);
    }
}

#[test]
fn test_checks_are_independent() {
    let blocks = parse_directory(&fixture("mixed")).unwrap();
    let full = Registry::with_builtin_checks().unwrap();
    let all_results = Scanner::new(&full).scan(&blocks);

    for check in builtin_checks() {
        let code = check.code().clone();

        let mut alone = Registry::new();
        alone.register_boxed(check).unwrap();
        let own: Vec<_> = Scanner::new(&alone).scan(&blocks);

        let expected: Vec<_> = all_results
            .iter()
            .filter(|r| r.code == code)
            .cloned()
            .collect();
        assert_eq!(own, expected, "results for {} changed", code);

        let without = Scanner::new(&full)
            .with_config(ScanConfig::new().exclude(code.clone()))
            .scan(&blocks);
        let others: Vec<_> = all_results
            .iter()
            .filter(|r| r.code != code)
            .cloned()
            .collect();
        assert_eq!(without, others, "removing {} changed other results", code);
    }
}

#[test]
fn test_config_file_in_scanned_directory() {
    let temp = TempDir::new().unwrap();
    write_tf(
        temp.path(),
        "main.tf",
        "resource \"aws_s3_bucket\" \"b\" {\n  acl = \"public-read\"\n}\n",
    );
    fs::create_dir(temp.path().join(".tfsec")).unwrap();
    fs::write(
        temp.path().join(".tfsec/config.yml"),
        "exclude:\n  - AWS002\n  - AWS017\nseverity_overrides:\n  AWS001: error\n",
    )
    .unwrap();

    let config = tfsec::load_config(None, temp.path()).unwrap();
    let blocks = Parser::from_config(&config)
        .unwrap()
        .parse_directory(temp.path())
        .unwrap();
    let registry = Registry::with_builtin_checks().unwrap();
    let results = Scanner::new(&registry).with_config(config).scan(&blocks);

    assert_eq!(codes(&results), vec!["AWS001"]);
    assert_eq!(results[0].severity, tfsec::Severity::Error);
}

#[test]
fn test_exclude_paths() {
    let temp = TempDir::new().unwrap();
    write_tf(
        temp.path(),
        "main.tf",
        "resource \"aws_s3_bucket\" \"b\" {\n  acl = \"public-read\"\n}\n",
    );
    write_tf(
        temp.path(),
        "generated.tf",
        "resource \"aws_s3_bucket\" \"g\" {\n  acl = \"public-read\"\n}\n",
    );

    let parser = Parser::new().exclude("generated*.tf").unwrap();
    let blocks = parser.parse_directory(temp.path()).unwrap();
    assert_eq!(blocks.files().count(), 1);
    assert!(blocks.files().all(|f| f.ends_with("main.tf")));
}
