//! Scan configuration loading.
//!
//! Configuration priority (highest to lowest):
//! 1. Command-line flags (merged by the caller)
//! 2. The file given with `--config-file`
//! 3. `.tfsec/config.{yml,yaml,json,toml}` in the scanned directory
//! 4. Defaults

pub mod types;

pub use types::ScanConfig;

use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".tfsec";
const CONFIG_FILE_NAMES: [&str; 4] = ["config.yml", "config.yaml", "config.json", "config.toml"];

/// Config files looked for inside a scanned directory, in order.
pub fn default_config_paths(dir: &Path) -> Vec<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(CONFIG_DIR).join(name))
        .collect()
}

/// Load a config file, picking the format from its extension.
pub fn load_config_file(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parse_error = |message: String| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    };

    let config: ScanConfig = match extension {
        "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        "json" => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        "toml" => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };

    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Resolve the config for a scan of `dir`.
///
/// An explicit file must exist and parse. Otherwise the first default location
/// that exists is used, falling back to defaults when none does.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<ScanConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    match default_config_paths(dir).into_iter().find(|p| p.is_file()) {
        Some(path) => load_config_file(&path),
        None => {
            log::debug!("no config file found in {}, using defaults", dir.display());
            Ok(ScanConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use tempfile::TempDir;

    fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_yaml_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            dir.path(),
            "config.yml",
            "exclude:\n  - AWS002\nseverity_overrides:\n  AWS001: error\nminimum_severity: warning\nrecursive: true\n",
        );

        let config = load_config(None, dir.path()).unwrap();
        assert!(config.is_excluded(&"AWS002".into()));
        assert_eq!(
            config.effective_severity(&"AWS001".into(), Severity::Warning),
            Severity::Error
        );
        assert_eq!(config.minimum_severity, Some(Severity::Warning));
        assert!(config.recursive);
    }

    #[test]
    fn test_json_and_toml_config() {
        let dir = TempDir::new().unwrap();
        let json = write_config(dir.path(), "custom.json", r#"{"exclude": ["GEN001"]}"#);
        let config = load_config(Some(&json), dir.path()).unwrap();
        assert!(config.is_excluded(&"GEN001".into()));

        let toml = write_config(
            dir.path(),
            "custom.toml",
            "exclude_paths = [\"vendor/*\"]\ndisable_inline_ignores = true\n",
        );
        let config = load_config(Some(&toml), dir.path()).unwrap();
        assert_eq!(config.exclude_paths, vec!["vendor/*".to_string()]);
        assert!(config.disable_inline_ignores);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(None, dir.path()).unwrap(), ScanConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("nope.yml")), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "config.json", "{ not json");
        let err = load_config(None, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "config.ini", "exclude=AWS001");
        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
    }
}
