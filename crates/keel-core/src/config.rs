//! Configuration types and parsing for keel.yml

use crate::error::{CoreError, CoreResult};
use crate::identifier::{SourceLayout, DEFAULT_EXTENSION, DEFAULT_ID_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &["keel.yml", "keel.yaml"];

/// Special database path that opens an in-memory database.
pub const MEMORY_DB_PATH: &str = ":memory:";

/// Project configuration from keel.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding migration sources, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Zero-pad width of migration id prefixes
    #[serde(default = "default_id_width")]
    pub id_width: usize,

    /// Migration file extension without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: DatabaseConfig::default(),
            id_width: default_id_width(),
            extension: default_extension(),
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_db_path() -> String {
    "keel.duckdb".to_string()
}

fn default_id_width() -> usize {
    DEFAULT_ID_WIDTH
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Config {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for keel.yml or keel.yaml; falls back to defaults when neither
    /// exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!(
            "No keel.yml in {}; using default configuration",
            dir.display()
        );
        Ok(Self::default())
    }

    fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        self.layout().validate()
    }

    /// Naming rules for migration sources
    pub fn layout(&self) -> SourceLayout {
        SourceLayout {
            id_width: self.id_width,
            extension: self.extension.clone(),
        }
    }

    /// Absolute migrations directory for a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Database path resolved against a project root; `:memory:` is passed through
    pub fn database_path_absolute(&self, root: &Path) -> String {
        if self.database.path == MEMORY_DB_PATH {
            MEMORY_DB_PATH.to_string()
        } else {
            root.join(&self.database.path).display().to_string()
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
