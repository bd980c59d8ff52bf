//! Migration identifier parsing and formatting.
//!
//! An identifier is a file name of the form `NNN_free_text_name.<ext>` where
//! `NNN` is a positive integer zero-padded to a fixed width. Lexical order of
//! identifiers equals numeric order only while every prefix has exactly that
//! width, so both shorter and longer prefixes are rejected.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::sync::OnceLock;

/// Default zero-pad width of migration ids.
pub const DEFAULT_ID_WIDTH: usize = 3;

/// Default migration file extension (without the dot).
pub const DEFAULT_EXTENSION: &str = "sql";

/// Widest id prefix accepted; keeps every id within `u32`.
pub const MAX_ID_WIDTH: usize = 9;

static STEM_PATTERN: OnceLock<Regex> = OnceLock::new();

fn stem_pattern() -> &'static Regex {
    STEM_PATTERN.get_or_init(|| Regex::new(r"^([0-9]+)_(.+)$").expect("valid regex literal"))
}

/// Fixed naming contract for migration sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Number of digits in every id prefix
    pub id_width: usize,

    /// File extension without the leading dot
    pub extension: String,
}

/// The pieces extracted from a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentifier {
    /// Numeric id
    pub id: u32,

    /// Human-readable name (separators replaced with spaces)
    pub name: String,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            id_width: DEFAULT_ID_WIDTH,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl SourceLayout {
    /// Create a layout, validating the width and extension.
    pub fn new(id_width: usize, extension: impl Into<String>) -> CoreResult<Self> {
        let layout = Self {
            id_width,
            extension: extension.into(),
        };
        layout.validate()?;
        Ok(layout)
    }

    pub(crate) fn validate(&self) -> CoreResult<()> {
        if self.id_width == 0 || self.id_width > MAX_ID_WIDTH {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "id_width must be between 1 and {MAX_ID_WIDTH}, got {}",
                    self.id_width
                ),
            });
        }
        if self.extension.is_empty()
            || self.extension.starts_with('.')
            || self.extension.contains(['/', '\\'])
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "extension must be a bare suffix such as 'sql', got '{}'",
                    self.extension
                ),
            });
        }
        Ok(())
    }

    /// Largest id representable at this width.
    pub fn max_id(&self) -> u32 {
        // id_width <= 9, so this never overflows u32
        10u32.pow(self.id_width as u32) - 1
    }

    /// Whether `file_name` carries this layout's extension.
    pub fn has_extension(&self, file_name: &str) -> bool {
        self.strip_extension(file_name).is_some()
    }

    fn strip_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.extension.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
    }

    /// Parse an identifier into its id and display name.
    pub fn parse(&self, identifier: &str) -> CoreResult<ParsedIdentifier> {
        let invalid = |reason: String| CoreError::InvalidIdentifierFormat {
            identifier: identifier.to_string(),
            reason,
        };

        let stem = self
            .strip_extension(identifier)
            .ok_or_else(|| invalid(format!("expected a '.{}' suffix", self.extension)))?;

        let caps = stem_pattern().captures(stem).ok_or_else(|| {
            invalid("expected a numeric prefix followed by '_' and a name".to_string())
        })?;
        let digits = &caps[1];
        let raw_name = &caps[2];

        if digits.len() > self.id_width {
            return Err(CoreError::IdentifierOverflow {
                identifier: identifier.to_string(),
                width: self.id_width,
            });
        }
        if digits.len() < self.id_width {
            return Err(invalid(format!(
                "numeric prefix must be zero-padded to {} digits",
                self.id_width
            )));
        }

        let id: u32 = digits
            .parse()
            .map_err(|e| invalid(format!("numeric prefix is not a valid id: {e}")))?;
        if id == 0 {
            return Err(invalid("ids start at 1".to_string()));
        }

        let name = display_name(raw_name);
        if name.is_empty() {
            return Err(invalid("name part is empty".to_string()));
        }

        Ok(ParsedIdentifier { id, name })
    }

    /// Build the identifier for `id` and an already-normalized `slug`.
    pub fn format(&self, id: u32, slug: &str) -> CoreResult<String> {
        if id == 0 || id > self.max_id() {
            return Err(CoreError::IdentifierOverflow {
                identifier: format!("{id}_{slug}.{}", self.extension),
                width: self.id_width,
            });
        }
        Ok(format!(
            "{id:0width$}_{slug}.{ext}",
            width = self.id_width,
            ext = self.extension
        ))
    }
}

/// Replace `_` and `-` separators with single spaces.
fn display_name(raw: &str) -> String {
    raw.split(['_', '-'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a free-text name into an identifier slug: lowercase, runs of
/// anything other than letters and digits collapsed into one `_`.
///
/// Letters and digits from any script are kept.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
