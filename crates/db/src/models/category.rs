use serde::{Deserialize, Serialize};

/// Stored field holding a category's name.
pub const NAME_FIELD: &str = "name";

/// A taxonomy category (genre).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// `_source` of a category document. The id comes from the document key.
#[derive(Debug, Deserialize)]
pub struct CategoryDocument {
    pub name: String,
}
