//! Core runtime configuration.
//!
//! # Responsibility
//! - Resolve where the snapshot database lives and under which key.
//! - Resolve logging level and directory.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - Environment overrides win over file values.

use crate::logging::default_log_level;
use crate::repo::snapshot_repo::DEFAULT_STORAGE_KEY;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "bloom.sqlite3";

pub const ENV_DB_PATH: &str = "BLOOM_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "BLOOM_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "BLOOM_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BLOOM_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CoreConfig {
    /// SQLite file holding the snapshot store.
    pub db_path: PathBuf,
    /// Key of the snapshot record inside the store.
    pub storage_key: String,
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `BLOOM_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary lookup; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = get(ENV_DB_PATH) {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_STORAGE_KEY) {
            self.storage_key = value;
        }
        if let Some(value) = get(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = get(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_STORAGE_KEY};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").expect("empty object is a valid config");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.storage_key, "bloomData");
    }

    #[test]
    fn file_values_are_read() {
        let config = CoreConfig::from_json_str(r#"{"db_path": "/tmp/j.db", "log_level": "warn"}"#)
            .expect("valid config json");
        assert_eq!(config.db_path, PathBuf::from("/tmp/j.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn overrides_replace_values_and_skip_blanks() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PATH, "/data/bloom.db"),
            (ENV_STORAGE_KEY, "  "),
            (ENV_LOG_DIR, "/logs"),
        ]);
        let config = CoreConfig::default()
            .with_overrides(|name| env.get(name).map(|value| value.to_string()));
        assert_eq!(config.db_path, PathBuf::from("/data/bloom.db"));
        assert_eq!(config.storage_key, "bloomData");
        assert_eq!(config.log_dir, Some(PathBuf::from("/logs")));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = CoreConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
