//! Configuration management for the CLI.

use shelf_engine::storage::is_valid_key;
use std::env;
use std::path::PathBuf;

/// Default directory for collection files.
pub const DEFAULT_DATA_DIR: &str = ".shelf";

/// Default collection key.
pub const DEFAULT_ENTITY: &str = "dogs";

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
    /// Storage key of the collection to operate on
    pub entity: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("SHELF_DATA_DIR").ok(),
            env::var("SHELF_ENTITY").ok(),
        )
    }

    /// Build configuration from raw values, applying defaults.
    pub fn from_vars(
        data_dir: Option<String>,
        entity: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match data_dir {
            Some(dir) if dir.trim().is_empty() => return Err(ConfigError::EmptyDataDir),
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(DEFAULT_DATA_DIR),
        };

        let entity = entity.unwrap_or_else(|| DEFAULT_ENTITY.to_string());
        validate_entity(&entity)?;

        Ok(Self { data_dir, entity })
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn with_overrides(
        mut self,
        data_dir: Option<PathBuf>,
        entity: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(entity) = entity {
            validate_entity(&entity)?;
            self.entity = entity;
        }
        Ok(self)
    }
}

/// Collection keys become file names, so keep them to a safe alphabet.
fn validate_entity(entity: &str) -> Result<(), ConfigError> {
    if is_valid_key(entity) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEntity(entity.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SHELF_DATA_DIR must not be empty")]
    EmptyDataDir,

    #[error("Invalid entity key: {0:?}")]
    InvalidEntity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".shelf"));
        assert_eq!(config.entity, "dogs");
    }

    #[test]
    fn explicit_values() {
        let config = Config::from_vars(Some("/tmp/data".into()), Some("books".into())).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.entity, "books");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_vars(Some("  ".into()), None),
            Err(ConfigError::EmptyDataDir)
        );
        assert_eq!(
            Config::from_vars(None, Some("../etc".into())),
            Err(ConfigError::InvalidEntity("../etc".into()))
        );
        assert!(Config::from_vars(None, Some(String::new())).is_err());
    }

    #[test]
    fn overrides_win() {
        let config = Config::from_vars(None, None)
            .unwrap()
            .with_overrides(Some(PathBuf::from("data")), Some("restaurants".into()))
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.entity, "restaurants");

        let err = Config::from_vars(None, None)
            .unwrap()
            .with_overrides(None, Some("a/b".into()))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidEntity("a/b".into()));
    }
}
