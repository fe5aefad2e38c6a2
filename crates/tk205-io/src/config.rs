//! Loader configuration.
//!
//! ```toml
//! [load]
//! validate = true
//! schema_dir = "schema"
//! escalate_at = "error"
//! extrapolation = "linear"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tk205_kernel::{Extrapolation, Severity};

/// How documents are read, checked and bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Validate each document against `<schema_dir>/<RS_ID>.schema.json`.
    pub validate: bool,
    pub schema_dir: PathBuf,
    /// Binding diagnostics at or above this severity fail the load.
    pub escalate_at: Option<Severity>,
    /// Out-of-range policy for every performance map.
    pub extrapolation: Extrapolation,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            validate: false,
            schema_dir: PathBuf::from("schema"),
            escalate_at: None,
            extrapolation: Extrapolation::Constant,
        }
    }
}

/// The `tk205.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tk205Config {
    pub load: LoaderConfig,
}

impl Tk205Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        let config: Tk205Config = toml::from_str("").expect("parse");
        assert_eq!(config, Tk205Config::default());
        assert!(!config.load.validate);
        assert_eq!(config.load.extrapolation, Extrapolation::Constant);
    }

    #[test]
    fn load_section_overrides_fields() {
        let config: Tk205Config = toml::from_str(
            r#"
            [load]
            validate = true
            schema_dir = "vendor/schema-205"
            escalate_at = "warn"
            extrapolation = "linear"
            "#,
        )
        .expect("parse");
        assert!(config.load.validate);
        assert_eq!(config.load.schema_dir, PathBuf::from("vendor/schema-205"));
        assert_eq!(config.load.escalate_at, Some(Severity::Warn));
        assert_eq!(config.load.extrapolation, Extrapolation::Linear);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Tk205Config, _> = toml::from_str("[load]\nvalidation = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Tk205Config::from_path("does/not/exist/tk205.toml").unwrap_err();
        assert!(err.to_string().starts_with("does/not/exist/tk205.toml: I/O error"));
    }
}
