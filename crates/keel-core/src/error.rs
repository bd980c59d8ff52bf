//! Error types for keel-core

use thiserror::Error;

/// Core error type for keel
#[derive(Error, Debug)]
pub enum CoreError {
    /// K001: Configuration file not found
    #[error("[K001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// K002: Invalid configuration value
    #[error("[K002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// K003: Migration identifier does not match `<digits>_<name>.<ext>`
    #[error("[K003] Invalid migration identifier '{identifier}': {reason}")]
    InvalidIdentifierFormat { identifier: String, reason: String },

    /// K004: Numeric prefix wider than the configured padding
    #[error("[K004] Migration identifier '{identifier}' overflows the {width}-digit id width; lexical and numeric ordering would diverge")]
    IdentifierOverflow { identifier: String, width: usize },

    /// K005: Two migration sources share the same numeric id
    #[error("[K005] Duplicate migration id {id}: '{first}' and '{second}'")]
    DuplicateMigrationId {
        id: u32,
        first: String,
        second: String,
    },

    /// K006: Scaffolder invoked without a usable name
    #[error("[K006] Migration name must not be empty")]
    EmptyName,

    /// K007: Scaffolder target already exists
    #[error("[K007] Migration file already exists: {path}")]
    MigrationExists { path: String },

    /// K008: IO error with file path context
    #[error("[K008] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// K009: Config YAML parse error
    #[error("[K009] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
