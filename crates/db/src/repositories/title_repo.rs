//! Title listing, free-text search, detail assembly, and similarity queries.

use std::sync::Arc;

use async_trait::async_trait;
use movies_core::query::{BoolQuery, Query, SearchQuery, SortField};
use movies_core::search::Page;
use movies_core::sort::{SortKey, SortSpec};

use crate::models::person::Person;
use crate::models::title::{fields, SummaryResult, Title};
use crate::projection;
use crate::repositories::{Catalog, CategoryRepo};
use crate::store::{Collection, DocumentStore, StoreError};

/// Provides read operations on the titles collection.
///
/// Category filters are expressed by id but titles store category names, so
/// the repo resolves them through the injected [`CategoryRepo`].
#[derive(Clone)]
pub struct TitleRepo {
    store: Arc<dyn DocumentStore>,
    categories: CategoryRepo,
}

impl TitleRepo {
    pub fn new(store: Arc<dyn DocumentStore>, categories: CategoryRepo) -> Self {
        Self { store, categories }
    }

    // -----------------------------------------------------------------------
    // Query builders
    // -----------------------------------------------------------------------

    /// Store field a sort key maps to.
    pub fn sort_field(spec: SortSpec) -> SortField {
        let field = match spec.key {
            SortKey::Rating => fields::RATING,
            SortKey::Name => fields::NAME_SORT,
        };
        SortField::new(field, spec.order)
    }

    /// Listing query: exact category-name filter (or match-all), sorted.
    pub fn list_query(sort: SortSpec, category_name: Option<&str>) -> SearchQuery {
        let query = match category_name {
            Some(name) => Query::term(fields::CATEGORIES, name),
            None => Query::MatchAll,
        };
        SearchQuery::new(query).sorted_by(Self::sort_field(sort))
    }

    /// Best-fields match across name and description, in relevance order.
    pub fn search_query(text: &str) -> SearchQuery {
        SearchQuery::new(Query::multi_match(
            [fields::NAME, fields::DESCRIPTION],
            text,
        ))
    }

    /// Query for titles similar to `title`.
    ///
    /// One should-clause per non-empty attribute (categories, each role
    /// list, name, description), at least one of which must match. The
    /// reference title itself is excluded and results are ordered by rating,
    /// highest first. Returns `None` when the title has no usable attribute.
    pub fn similar_query(title: &Title) -> Option<SearchQuery> {
        let mut should = Vec::new();

        let category_names: Vec<String> = title
            .categories
            .iter()
            .map(|c| c.name.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        if !category_names.is_empty() {
            should.push(Query::terms(fields::CATEGORIES, category_names));
        }

        let roles = [
            (fields::PERFORMERS, &title.performers),
            (fields::DIRECTORS, &title.directors),
            (fields::WRITERS, &title.writers),
        ];
        for (path, people) in roles {
            if let Some(clause) = role_clause(path, people) {
                should.push(clause);
            }
        }

        if !title.name.trim().is_empty() {
            should.push(Query::fuzzy_match(fields::NAME, title.name.as_str()));
        }
        if let Some(description) = title.description.as_deref() {
            if !description.trim().is_empty() {
                should.push(Query::fuzzy_match(fields::DESCRIPTION, description));
            }
        }

        if should.is_empty() {
            return None;
        }

        let query = Query::Bool(BoolQuery {
            should,
            must_not: vec![Query::term(fields::ID, title.id.as_str())],
            minimum_should_match: Some(1),
            ..Default::default()
        });
        Some(SearchQuery::new(query).sorted_by(SortField::desc(fields::RATING)))
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// List titles sorted by `sort`, optionally restricted to one category.
    ///
    /// An unknown category id yields an empty page.
    pub async fn list(
        &self,
        sort: SortSpec,
        category_id: Option<&str>,
        page: Page,
    ) -> Result<Vec<SummaryResult>, StoreError> {
        let category_name = match category_id {
            Some(id) => match self.categories.name_by_id(id).await? {
                Some(name) => Some(name),
                None => {
                    tracing::debug!(genre_id = id, "Unknown genre filter, returning empty page");
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let query = Self::list_query(sort, category_name.as_deref());
        let hits = self
            .store
            .search(Collection::Titles, &query, page.window())
            .await?;
        projection::summaries(&hits)
    }

    /// Titles sharing categories, people, or wording with `id`.
    ///
    /// Unknown ids and titles without any usable attribute yield an empty
    /// page without a similarity query being issued.
    pub async fn similar(&self, id: &str, page: Page) -> Result<Vec<SummaryResult>, StoreError> {
        let Some(title) = self.get_by_id(id).await? else {
            tracing::debug!(film_id = id, "Reference film not found");
            return Ok(Vec::new());
        };

        let Some(query) = Self::similar_query(&title) else {
            tracing::debug!(film_id = id, "Reference film has no usable attributes");
            return Ok(Vec::new());
        };

        let hits = self
            .store
            .search(Collection::Titles, &query, page.window())
            .await?;
        tracing::debug!(film_id = id, results = hits.len(), "Similar films found");
        projection::summaries(&hits)
    }
}

#[async_trait]
impl Catalog for TitleRepo {
    type Record = Title;
    type Summary = SummaryResult;

    const ENTITY: &'static str = "Film";

    /// Fetch a title and resolve its stored category names.
    async fn get_by_id(&self, id: &str) -> Result<Option<Title>, StoreError> {
        let Some(doc) = self.store.get_by_id(Collection::Titles, id).await? else {
            return Ok(None);
        };

        let parsed = projection::title_document(&doc)?;
        let categories = self.categories.by_names(parsed.category_names()).await?;
        Ok(Some(projection::title_from_document(
            doc.id, parsed, categories,
        )))
    }

    async fn search(&self, text: &str, page: Page) -> Result<Vec<SummaryResult>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self
            .store
            .search(Collection::Titles, &Self::search_query(text), page.window())
            .await?;
        tracing::debug!(query = text, results = hits.len(), "Film search executed");
        projection::summaries(&hits)
    }
}

/// Nested exact-term clause over one role list's names.
fn role_clause(path: &str, people: &[Person]) -> Option<Query> {
    let names: Vec<&str> = people
        .iter()
        .map(|p| p.full_name.as_str())
        .filter(|n| !n.trim().is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    Some(Query::nested(
        path,
        Query::terms(format!("{path}.name"), names),
    ))
}
