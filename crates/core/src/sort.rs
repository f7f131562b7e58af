//! Sort-token parsing for title listings.
//!
//! Token syntax is `[-]field`. A leading `-` sorts descending, anything else
//! ascending. Unknown field names degrade to the rating key.

use crate::query::SortOrder;

/// Token used when the caller does not supply one.
pub const DEFAULT_SORT: &str = "-imdb_rating";

/// Sortable title attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rating,
    Name,
}

impl SortKey {
    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" | "title" => SortKey::Name,
            _ => SortKey::Rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    /// Parse a `[-]field` token. Never fails.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            return Self::default();
        }
        match token.strip_prefix('-') {
            Some(field) => Self {
                key: SortKey::from_name(field),
                order: SortOrder::Descending,
            },
            None => Self {
                key: SortKey::from_name(token.trim_start_matches('+')),
                order: SortOrder::Ascending,
            },
        }
    }
}

impl Default for SortSpec {
    /// Highest rated first.
    fn default() -> Self {
        Self {
            key: SortKey::Rating,
            order: SortOrder::Descending,
        }
    }
}
