//! keel-db - Embedded database layer for keel
//!
//! Wraps a DuckDB connection to the application's single database file,
//! provides a scoped [`Transaction`] guard that commits or rolls back on
//! every exit path, and owns the `migrations` ledger table.

pub mod connection;
pub mod error;
pub mod ledger;
pub mod transaction;

pub use connection::Database;
pub use error::{DbError, DbResult};
pub use transaction::Transaction;
