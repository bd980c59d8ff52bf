//! Project context shared by CLI commands

use anyhow::{Context, Result};
use keel_core::{Config, DirectorySource, Scaffolder};
use keel_db::Database;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Resolved project root, configuration, and overrides
pub(crate) struct ProjectContext {
    /// Project root directory
    pub root: PathBuf,

    /// Loaded (or default) configuration
    pub config: Config,

    database_override: Option<String>,
}

impl ProjectContext {
    /// Load configuration from the global arguments
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        Ok(Self {
            root,
            config,
            database_override: args.database.clone(),
        })
    }

    /// Database path after applying the `--database` override
    pub fn database_path(&self) -> String {
        match &self.database_override {
            Some(path) => path.clone(),
            None => self.config.database_path_absolute(&self.root),
        }
    }

    /// Open the configured database
    pub fn open_database(&self) -> Result<Database> {
        let path = self.database_path();
        log::debug!("Opening database {path}");
        Database::new(&path).with_context(|| format!("Failed to open database '{path}'"))
    }

    /// Migration source for the configured directory
    pub fn source(&self) -> DirectorySource {
        DirectorySource::new(self.migrations_dir(), self.config.layout())
    }

    /// Scaffolder for the configured directory
    pub fn scaffolder(&self) -> Scaffolder {
        Scaffolder::new(self.migrations_dir(), self.config.layout())
    }

    fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_dir_absolute(&self.root)
    }
}
