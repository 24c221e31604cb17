//! Run configuration (`lint.toml`).
//!
//! A run is described by one TOML file naming the registry, the files to
//! check, and where backups and reports go:
//!
//! ```toml
//! registry = "data/tools.json"
//! files = [
//!     "messages/en/pages/index.json",
//!     "messages/zh/pages/index.json",
//! ]
//! backup_dir = "backups"
//! report_dir = "reports"
//! log_level = "info"          # debug | info | warn | error
//! ```
//!
//! Config files are sparse — only `files` has no usable default. Unknown
//! keys are rejected to catch typos early.

use crate::output::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Run configuration loaded from `lint.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Path to the tools registry JSON — the source of truth for slugs.
    pub registry: PathBuf,
    /// Configuration files to validate and correct.
    pub files: Vec<PathBuf>,
    /// Directory pre-fix backups are written into.
    pub backup_dir: PathBuf,
    /// Directory JSON validation reports are written into.
    pub report_dir: PathBuf,
    /// Minimum reporter level.
    pub log_level: LogLevel,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            registry: PathBuf::from("data/tools.json"),
            files: Vec::new(),
            backup_dir: PathBuf::from("backups"),
            report_dir: PathBuf::from("reports"),
            log_level: LogLevel::Info,
        }
    }
}

impl LintConfig {
    /// Check the config describes a runnable batch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::Validation(
                "files must list at least one configuration file".into(),
            ));
        }
        if self.registry.as_os_str().is_empty() {
            return Err(ConfigError::Validation("registry path must be set".into()));
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<LintConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LintConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock `lint.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# effects-lint run configuration.
# All keys except `files` are optional - defaults shown below.

# Source of truth for tool slugs: a JSON array of tool records.
registry = "data/tools.json"

# Configuration files to validate and correct.
files = [
    "messages/en/pages/index.json",
    "messages/zh/pages/index.json",
    "messages/en/pages/photo-effects.json",
    "messages/en/pages/video-effects.json",
    "messages/zh/pages/photo-effects.json",
    "messages/zh/pages/video-effects.json",
]

# Where pre-fix backups of mutated files go. Backups are additive and
# never deleted automatically.
backup_dir = "backups"

# Where `validate --report` writes JSON reports.
report_dir = "reports"

# Minimum log level: debug | info | warn | error
log_level = "info"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_str(content: &str) -> Result<LintConfig, ConfigError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        load_config(file.path())
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let config = load_str(r#"files = ["a.json"]"#).unwrap();
        assert_eq!(config.registry, PathBuf::from("data/tools.json"));
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
        assert_eq!(config.report_dir, PathBuf::from("reports"));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn full_config_overrides_everything() {
        let config = load_str(
            r#"
            registry = "tools/registry.json"
            files = ["x.json", "y.json"]
            backup_dir = "bk"
            report_dir = "rp"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.backup_dir, PathBuf::from("bk"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_str(r#"files = ["a.json"]
backup_dirr = "typo""#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn empty_file_list_fails_validation() {
        let err = load_str(r#"registry = "data/tools.json""#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/lint.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn stock_config_parses_and_validates() {
        let config: LintConfig = toml::from_str(stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.files.len(), 6);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
