//! Read-only accessor over the collections held by the document store.
//!
//! [`DocumentStore`] is the seam between the catalogs and the search engine.
//! Production code uses [`crate::elastic::ElasticStore`]; tests substitute an
//! in-memory implementation.

use async_trait::async_trait;
use movies_core::query::SearchQuery;
use movies_core::search::Window;
use serde_json::Value;

/// Logical collections the catalog reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Titles,
    Categories,
}

impl Collection {
    /// Entity label used in logs and not-found messages.
    pub fn entity(self) -> &'static str {
        match self {
            Collection::Titles => "Film",
            Collection::Categories => "Genre",
        }
    }
}

/// A document fetched by primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub source: Value,
}

/// One search hit, in engine order.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: String,
    /// Relevance score; absent when an explicit sort is applied.
    pub score: Option<f64>,
    pub source: Value,
}

impl Hit {
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            score: None,
            source,
        }
    }
}

/// Errors from the document store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Every attempt timed out, retries included.
    #[error("Document store timed out after {attempts} attempt(s)")]
    Timeout { attempts: u32 },

    /// The HTTP request itself failed (connection refused, DNS, TLS, ...).
    #[error("Document store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine rejected the request.
    #[error("Document store error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A stored document did not have the expected shape.
    #[error("Malformed document {id}: {reason}")]
    Decode { id: String, reason: String },

    /// The configured store URL cannot be used as a base URL.
    #[error("Invalid document store URL: {0}")]
    InvalidUrl(String),

    /// The client was shut down while the call was waiting for a connection.
    #[error("Document store client is closed")]
    Closed,
}

impl StoreError {
    /// Whether the failure means the store could not be reached in time,
    /// as opposed to the store answering with an error.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Timeout { .. } | StoreError::Transport(_) | StoreError::Closed
        )
    }
}

/// Generic read accessor over a named collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document. `Ok(None)` when the id does not exist.
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Run a structured query and return at most `window.limit` hits starting
    /// at `window.offset`, in relevance or explicit-sort order.
    async fn search(
        &self,
        collection: Collection,
        query: &SearchQuery,
        window: Window,
    ) -> Result<Vec<Hit>, StoreError>;

    /// Reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
