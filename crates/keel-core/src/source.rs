//! Migration discovery.
//!
//! [`MigrationSource`] is the seam between the runner and wherever migration
//! text lives. [`DirectorySource`] reads a migrations directory on disk;
//! [`MemorySource`] holds sources in memory so the runner can be exercised
//! without touching the filesystem.

use crate::definition::MigrationDefinition;
use crate::error::{CoreError, CoreResult};
use crate::identifier::SourceLayout;
use std::path::{Path, PathBuf};

/// Provider of the ordered migration definition sequence.
///
/// `discover` is a pure read and may be called any number of times.
pub trait MigrationSource {
    /// All definitions, ascending by id.
    fn discover(&self) -> CoreResult<Vec<MigrationDefinition>>;

    /// Short description for log messages
    fn describe(&self) -> String;
}

/// Parse `(identifier, content)` pairs into definitions.
///
/// Sources are ordered by identifier, lexically. The layout's fixed-width
/// prefixes make that the same as numeric order; anything that would break
/// that equivalence is rejected during parsing.
fn assemble(
    layout: &SourceLayout,
    mut sources: Vec<(String, String)>,
) -> CoreResult<Vec<MigrationDefinition>> {
    sources.sort_by(|a, b| a.0.cmp(&b.0));

    let mut definitions: Vec<MigrationDefinition> = Vec::with_capacity(sources.len());
    for (identifier, content) in &sources {
        let definition = MigrationDefinition::parse(layout, identifier, content)?;
        if let Some(previous) = definitions.last() {
            if previous.id == definition.id {
                return Err(CoreError::DuplicateMigrationId {
                    id: definition.id,
                    first: previous.source_key.clone(),
                    second: definition.source_key,
                });
            }
        }
        definitions.push(definition);
    }
    Ok(definitions)
}

/// Migration sources read from a directory of `NNN_name.<ext>` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    layout: SourceLayout,
}

impl DirectorySource {
    /// Create a source for `dir` using `layout` naming rules.
    pub fn new(dir: impl Into<PathBuf>, layout: SourceLayout) -> Self {
        Self {
            dir: dir.into(),
            layout,
        }
    }

    /// Directory being scanned
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Naming rules in effect
    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    /// File names in the directory carrying the layout's extension, sorted.
    ///
    /// A missing directory yields no identifiers.
    pub fn identifiers(&self) -> CoreResult<Vec<String>> {
        Ok(self
            .files()?
            .into_iter()
            .map(|(identifier, _)| identifier)
            .collect())
    }

    fn files(&self) -> CoreResult<Vec<(String, PathBuf)>> {
        if !self.dir.exists() {
            log::debug!(
                "Migrations directory {} does not exist; nothing to discover",
                self.dir.display()
            );
            return Ok(Vec::new());
        }
        if !self.dir.is_dir() {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "migrations path is not a directory: {}",
                    self.dir.display()
                ),
            });
        }

        let io_err = |source: std::io::Error| CoreError::IoWithPath {
            path: self.dir.display().to_string(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                return Err(CoreError::InvalidIdentifierFormat {
                    identifier: path.display().to_string(),
                    reason: "file name is not valid UTF-8".to_string(),
                });
            };
            if !self.layout.has_extension(file_name) {
                log::debug!("Skipping non-migration file {}", path.display());
                continue;
            }
            files.push((file_name.to_string(), path));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}

impl MigrationSource for DirectorySource {
    fn discover(&self) -> CoreResult<Vec<MigrationDefinition>> {
        let mut sources = Vec::new();
        for (identifier, path) in self.files()? {
            let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })?;
            sources.push((identifier, content));
        }

        let definitions = assemble(&self.layout, sources)?;
        log::debug!(
            "Discovered {} migration(s) in {}",
            definitions.len(),
            self.dir.display()
        );
        Ok(definitions)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Migration sources held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    layout: SourceLayout,
    sources: Vec<(String, String)>,
}

impl MemorySource {
    /// Empty source with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty source with a custom layout.
    pub fn with_layout(layout: SourceLayout) -> Self {
        Self {
            layout,
            sources: Vec::new(),
        }
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, identifier: impl Into<String>, content: impl Into<String>) -> Self {
        self.push(identifier, content);
        self
    }

    /// Add a source. Insertion order is irrelevant to discovery.
    pub fn push(&mut self, identifier: impl Into<String>, content: impl Into<String>) {
        self.sources.push((identifier.into(), content.into()));
    }

    /// Number of sources held
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are held
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl MigrationSource for MemorySource {
    fn discover(&self) -> CoreResult<Vec<MigrationDefinition>> {
        assemble(&self.layout, self.sources.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} source(s)>", self.sources.len())
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
