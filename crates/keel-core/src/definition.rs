//! Parsed migration definitions.

use crate::body::split_body;
use crate::error::CoreResult;
use crate::identifier::SourceLayout;
use serde::Serialize;

/// Numeric migration id; the sole ordering key.
pub type MigrationId = u32;

/// One migration, derived from a source on every discovery.
///
/// Never persisted; the ledger only remembers that it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationDefinition {
    /// Positive, unique, strictly increasing id from the identifier prefix
    pub id: MigrationId,

    /// Human-readable name derived from the identifier
    pub name: String,

    /// Original identifier (file name); recorded in the ledger's `filename` column
    pub source_key: String,

    /// Statement batch applied forward
    #[serde(skip)]
    pub up: String,

    /// Statement batch applied backward; empty for irreversible migrations
    #[serde(skip)]
    pub down: String,
}

impl MigrationDefinition {
    /// Parse one source's identifier and content.
    pub fn parse(layout: &SourceLayout, identifier: &str, content: &str) -> CoreResult<Self> {
        let parsed = layout.parse(identifier)?;
        let body = split_body(content);
        Ok(Self {
            id: parsed.id,
            name: parsed.name,
            source_key: identifier.to_string(),
            up: body.up,
            down: body.down,
        })
    }

    /// Whether a `-- DOWN` batch exists.
    pub fn is_reversible(&self) -> bool {
        !self.down.is_empty()
    }
}
