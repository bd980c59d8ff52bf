//! Splitting a migration source body into its forward and backward batches.
//!
//! ```text
//! -- UP
//! CREATE TABLE members (id INTEGER);
//! -- DOWN
//! DROP TABLE members;
//! ```
//!
//! Markers are whole lines matched case-insensitively. The `-- UP` line is
//! optional; without a `-- DOWN` line the migration is irreversible.

use regex::Regex;
use std::sync::OnceLock;

static UP_MARKER: OnceLock<Regex> = OnceLock::new();
static DOWN_MARKER: OnceLock<Regex> = OnceLock::new();

fn up_marker() -> &'static Regex {
    UP_MARKER.get_or_init(|| Regex::new(r"(?im)^[ \t]*--[ \t]*up[ \t]*\r?$").expect("valid regex"))
}

fn down_marker() -> &'static Regex {
    DOWN_MARKER
        .get_or_init(|| Regex::new(r"(?im)^[ \t]*--[ \t]*down[ \t]*\r?$").expect("valid regex"))
}

/// Forward and backward statement batches of one migration source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitBody {
    /// Statements applied by `up`
    pub up: String,

    /// Statements applied by `down`; empty when the source has none
    pub down: String,
}

/// Split `content` at the first `-- DOWN` marker line.
///
/// Everything before the marker (minus an `-- UP` marker line) is the up
/// batch; everything after it is the down batch. Both are trimmed.
pub fn split_body(content: &str) -> SplitBody {
    let (up_part, down_part) = match down_marker().find(content) {
        Some(m) => (&content[..m.start()], &content[m.end()..]),
        None => (content, ""),
    };

    let up = up_marker().replace(up_part, "");

    SplitBody {
        up: up.trim().to_string(),
        down: down_part.trim().to_string(),
    }
}
