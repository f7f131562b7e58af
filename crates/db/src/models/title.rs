//! Title documents and the records projected from them.

use serde::{Deserialize, Serialize};

use crate::models::category::Category;
use crate::models::person::Person;

/// Field names in the titles index.
pub mod fields {
    pub const NAME: &str = "title";
    /// Keyword sub-field of [`NAME`], used for sorting.
    pub const NAME_SORT: &str = "title.raw";
    pub const RATING: &str = "imdb_rating";
    pub const DESCRIPTION: &str = "description";
    /// Category names (not ids).
    pub const CATEGORIES: &str = "genres";
    pub const PERFORMERS: &str = "actors";
    pub const WRITERS: &str = "writers";
    pub const DIRECTORS: &str = "directors";
    pub const ID: &str = "_id";
}

/// `_source` of a title document as stored in the index.
///
/// List fields may be missing or `null` in older documents.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleDocument {
    pub title: String,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub actors: Option<Vec<Person>>,
    #[serde(default)]
    pub writers: Option<Vec<Person>>,
    #[serde(default)]
    pub directors: Option<Vec<Person>>,
}

impl TitleDocument {
    /// Stored category names, empty when the field is absent.
    pub fn category_names(&self) -> &[String] {
        self.genres.as_deref().unwrap_or_default()
    }
}

/// Full title record returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub categories: Vec<Category>,
    pub performers: Vec<Person>,
    pub writers: Vec<Person>,
    pub directors: Vec<Person>,
}

/// Lightweight projection used by listing, search, and similarity results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
}
