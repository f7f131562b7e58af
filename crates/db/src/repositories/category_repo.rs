//! Category (genre) listing, search, and id/name resolution.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use movies_core::query::{BoolQuery, Query, SearchQuery};
use movies_core::search::{Page, Window, MAX_LIST_PAGE_SIZE};

use crate::models::category::{Category, NAME_FIELD};
use crate::projection;
use crate::repositories::Catalog;
use crate::store::{Collection, DocumentStore, StoreError};

/// Provides read operations on the categories collection.
#[derive(Clone)]
pub struct CategoryRepo {
    store: Arc<dyn DocumentStore>,
}

impl CategoryRepo {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Resolve a category id to its name. `None` when the id is unknown.
    pub async fn name_by_id(&self, id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_by_id(id).await?.map(|category| category.name))
    }

    /// Query matching any of `names`, tolerant of near-duplicates.
    ///
    /// Clauses are deduplicated and emitted in alphabetical order; the order
    /// of a `should` list does not affect matching. Returns `None` when there
    /// is nothing to look up.
    pub fn names_query(names: &[String]) -> Option<SearchQuery> {
        let unique: BTreeSet<&str> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();
        if unique.is_empty() {
            return None;
        }

        let should = unique
            .into_iter()
            .map(|name| Query::fuzzy_match(NAME_FIELD, name))
            .collect();
        Some(SearchQuery::new(Query::Bool(BoolQuery {
            should,
            minimum_should_match: Some(1),
            ..Default::default()
        })))
    }

    /// Resolve stored category names into canonical [`Category`] records.
    ///
    /// Fuzzy matching can rank near-duplicates (`Dramas` for `Drama`) above
    /// the exact category, so the search reads a wider window than the
    /// number of names and then keeps one hit per name: the exact match
    /// (ignoring case) when present, otherwise the best-ranked unclaimed hit.
    /// Results follow the stored name order. Empty input yields an empty list
    /// without querying the store.
    pub async fn by_names(&self, names: &[String]) -> Result<Vec<Category>, StoreError> {
        let Some(query) = Self::names_query(names) else {
            return Ok(Vec::new());
        };

        let limit = (names.len() as u64).max(u64::from(MAX_LIST_PAGE_SIZE));
        let hits = self
            .store
            .search(Collection::Categories, &query, Window { offset: 0, limit })
            .await?;
        let candidates = projection::categories(&hits)?;
        Ok(pick_per_name(names, candidates))
    }

    /// Unsorted listing of all categories.
    pub async fn list(&self, page: Page) -> Result<Vec<Category>, StoreError> {
        let hits = self
            .store
            .search(
                Collection::Categories,
                &SearchQuery::new(Query::MatchAll),
                page.window(),
            )
            .await?;
        projection::categories(&hits)
    }
}

/// One candidate per distinct requested name, in requested order.
fn pick_per_name(names: &[String], candidates: Vec<Category>) -> Vec<Category> {
    let mut claimed = vec![false; candidates.len()];
    let mut seen = BTreeSet::new();
    let mut picked = Vec::new();

    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !seen.insert(name.to_lowercase()) {
            continue;
        }
        let exact = (0..candidates.len())
            .find(|&i| !claimed[i] && candidates[i].name.eq_ignore_ascii_case(name));
        let chosen = exact.or_else(|| {
            (0..candidates.len()).find(|&i| {
                !claimed[i]
                    && !names
                        .iter()
                        .any(|n| n.trim().eq_ignore_ascii_case(&candidates[i].name))
            })
        });
        if let Some(i) = chosen {
            claimed[i] = true;
            picked.push(candidates[i].clone());
        }
    }
    picked
}

#[async_trait]
impl Catalog for CategoryRepo {
    type Record = Category;
    type Summary = Category;

    const ENTITY: &'static str = "Genre";

    async fn get_by_id(&self, id: &str) -> Result<Option<Category>, StoreError> {
        match self.store.get_by_id(Collection::Categories, id).await? {
            Some(doc) => Ok(Some(projection::category_from_document(&doc)?)),
            None => Ok(None),
        }
    }

    /// Fuzzy match on the name, tolerant of minor misspellings.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Category>, StoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self
            .store
            .search(
                Collection::Categories,
                &SearchQuery::new(Query::fuzzy_match(NAME_FIELD, query)),
                page.window(),
            )
            .await?;
        tracing::debug!(query, results = hits.len(), "Genre search executed");
        projection::categories(&hits)
    }
}
