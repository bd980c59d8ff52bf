//! Authoring-time generation of new, correctly numbered migration files.

use crate::error::{CoreError, CoreResult};
use crate::identifier::{slugify, SourceLayout};
use crate::source::DirectorySource;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Body written into every new migration.
pub const TEMPLATE: &str = "-- UP\n\n\n-- DOWN\n\n";

/// Creates empty migration sources in a migrations directory.
///
/// Assumes a single author; two concurrent invocations could pick the same
/// id, which the second file write would then refuse.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    source: DirectorySource,
}

impl Scaffolder {
    /// Scaffolder writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>, layout: SourceLayout) -> Self {
        Self {
            source: DirectorySource::new(dir, layout),
        }
    }

    /// Id the next migration will receive: one past the highest existing id.
    pub fn next_id(&self) -> CoreResult<u32> {
        let layout = self.source.layout();
        let mut max = 0;
        for identifier in self.source.identifiers()? {
            max = max.max(layout.parse(&identifier)?.id);
        }
        Ok(max + 1)
    }

    /// Write a new migration named after `name` and return its identifier.
    pub fn create(&self, name: &str) -> CoreResult<String> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(CoreError::EmptyName);
        }

        let id = self.next_id()?;
        let identifier = self.source.layout().format(id, &slug)?;

        let dir = self.source.dir();
        std::fs::create_dir_all(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;

        let path = dir.join(&identifier);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    CoreError::MigrationExists {
                        path: path.display().to_string(),
                    }
                } else {
                    CoreError::IoWithPath {
                        path: path.display().to_string(),
                        source: e,
                    }
                }
            })?;
        file.write_all(TEMPLATE.as_bytes())
            .map_err(|e| CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })?;

        log::info!("Created migration {}", path.display());
        Ok(identifier)
    }
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
