//! keel-core - Core library for keel
//!
//! This crate provides the migration definition model, source-file parsing,
//! the [`MigrationSource`] discovery seam (filesystem and in-memory), project
//! configuration, and the authoring-time scaffolder shared by the other keel
//! crates.

pub mod body;
pub mod config;
pub mod definition;
pub mod error;
pub mod identifier;
pub mod record;
pub mod scaffold;
pub mod source;

pub use body::{split_body, SplitBody};
pub use config::{Config, DatabaseConfig};
pub use definition::{MigrationDefinition, MigrationId};
pub use error::{CoreError, CoreResult};
pub use identifier::{ParsedIdentifier, SourceLayout};
pub use record::AppliedRecord;
pub use scaffold::Scaffolder;
pub use source::{DirectorySource, MemorySource, MigrationSource};
