//! Structured query DSL for the document store.
//!
//! Catalogs build a [`SearchQuery`] out of these types instead of raw JSON so
//! the shape of each query can be asserted in tests. [`SearchQuery::to_body`]
//! renders the Elasticsearch request body (`query`, `sort`, `from`, `size`).

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::search::Window;

// ---------------------------------------------------------------------------
// Query clauses
// ---------------------------------------------------------------------------

/// A single query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every document.
    MatchAll,
    /// Analysed full-text match on one field, with the edit distance chosen
    /// by the engine from the term length (`fuzziness: AUTO`).
    FuzzyMatch { field: String, query: String },
    /// Best-fields match of one text across several fields.
    MultiMatch { fields: Vec<String>, query: String },
    /// Exact, unanalysed value.
    Term { field: String, value: String },
    /// Exact match against any of the values.
    Terms { field: String, values: Vec<String> },
    /// Clause evaluated inside each object of a nested list field.
    Nested { path: String, query: Box<Query> },
    /// Boolean combination.
    Bool(BoolQuery),
}

impl Query {
    pub fn fuzzy_match(field: impl Into<String>, query: impl Into<String>) -> Self {
        Query::FuzzyMatch {
            field: field.into(),
            query: query.into(),
        }
    }

    pub fn multi_match<I, S>(fields: I, query: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::MultiMatch {
            fields: fields.into_iter().map(Into::into).collect(),
            query: query.into(),
        }
    }

    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn nested(path: impl Into<String>, query: Query) -> Self {
        Query::Nested {
            path: path.into(),
            query: Box::new(query),
        }
    }

    /// Render the clause as Elasticsearch query DSL.
    pub fn to_value(&self) -> Value {
        match self {
            Query::MatchAll => json!({ "match_all": {} }),
            Query::FuzzyMatch { field, query } => json!({
                "match": { field: { "query": query, "fuzziness": "AUTO" } }
            }),
            Query::MultiMatch { fields, query } => json!({
                "multi_match": {
                    "query": query,
                    "fields": fields,
                    "type": "best_fields",
                }
            }),
            Query::Term { field, value } => json!({ "term": { field: value } }),
            Query::Terms { field, values } => json!({ "terms": { field: values } }),
            Query::Nested { path, query } => json!({
                "nested": {
                    "path": path,
                    "query": query.to_value(),
                }
            }),
            Query::Bool(b) => b.to_value(),
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// `bool` query. Empty clause lists are omitted from the rendered body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub should: Vec<Query>,
    pub filter: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn to_value(&self) -> Value {
        let mut body = Map::new();
        let lists = [
            ("should", &self.should),
            ("filter", &self.filter),
            ("must_not", &self.must_not),
        ];
        for (key, clauses) in lists {
            if !clauses.is_empty() {
                let rendered: Vec<Value> = clauses.iter().map(Query::to_value).collect();
                body.insert(key.into(), Value::Array(rendered));
            }
        }
        if let Some(min) = self.minimum_should_match {
            body.insert("minimum_should_match".into(), Value::from(min));
        }
        json!({ "bool": body })
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// One sort key. Hits missing the field follow the engine's default
/// placement (last, for both orders).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

impl SortField {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Descending)
    }

    pub fn to_value(&self) -> Value {
        json!({ self.field.as_str(): { "order": self.order.as_str() } })
    }
}

// ---------------------------------------------------------------------------
// Full request
// ---------------------------------------------------------------------------

/// A query plus its explicit sort keys. No sort keys means relevance order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: Query,
    pub sort: Vec<SortField>,
}

impl SearchQuery {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, field: SortField) -> Self {
        self.sort.push(field);
        self
    }

    /// Request body for the engine's `_search` endpoint.
    pub fn to_body(&self, window: Window) -> Value {
        let mut body = Map::new();
        body.insert("query".into(), self.query.to_value());
        if !self.sort.is_empty() {
            let sort: Vec<Value> = self.sort.iter().map(SortField::to_value).collect();
            body.insert("sort".into(), Value::Array(sort));
        }
        body.insert("from".into(), Value::from(window.offset));
        body.insert("size".into(), Value::from(window.limit));
        Value::Object(body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
