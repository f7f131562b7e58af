//! Projection of raw store documents and hits into typed records.
//!
//! A document that fails to decode fails the whole call; pages are never
//! returned with entries silently dropped.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::category::{Category, CategoryDocument};
use crate::models::title::{SummaryResult, Title, TitleDocument};
use crate::store::{Document, Hit, StoreError};

#[derive(Deserialize)]
struct SummarySource {
    title: String,
    #[serde(default)]
    imdb_rating: Option<f64>,
}

fn decode<T: DeserializeOwned>(id: &str, source: &Value) -> Result<T, StoreError> {
    T::deserialize(source).map_err(|e| StoreError::Decode {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

pub fn summary_from_hit(hit: &Hit) -> Result<SummaryResult, StoreError> {
    let source: SummarySource = decode(&hit.id, &hit.source)?;
    Ok(SummaryResult {
        id: hit.id.clone(),
        name: source.title,
        rating: source.imdb_rating,
    })
}

pub fn summaries(hits: &[Hit]) -> Result<Vec<SummaryResult>, StoreError> {
    hits.iter().map(summary_from_hit).collect()
}

pub fn category_from_hit(hit: &Hit) -> Result<Category, StoreError> {
    let source: CategoryDocument = decode(&hit.id, &hit.source)?;
    Ok(Category {
        id: hit.id.clone(),
        name: source.name,
    })
}

pub fn categories(hits: &[Hit]) -> Result<Vec<Category>, StoreError> {
    hits.iter().map(category_from_hit).collect()
}

pub fn category_from_document(doc: &Document) -> Result<Category, StoreError> {
    let source: CategoryDocument = decode(&doc.id, &doc.source)?;
    Ok(Category {
        id: doc.id.clone(),
        name: source.name,
    })
}

pub fn title_document(doc: &Document) -> Result<TitleDocument, StoreError> {
    decode(&doc.id, &doc.source)
}

/// Assemble the detail record once category names have been resolved.
pub fn title_from_document(id: String, doc: TitleDocument, categories: Vec<Category>) -> Title {
    Title {
        id,
        name: doc.title,
        rating: doc.imdb_rating,
        description: doc.description,
        categories,
        performers: doc.actors.unwrap_or_default(),
        writers: doc.writers.unwrap_or_default(),
        directors: doc.directors.unwrap_or_default(),
    }
}
