//! Catalogs over the document store.
//!
//! Each catalog holds a shared [`DocumentStore`](crate::store::DocumentStore)
//! handle, builds structured queries for its collection, and projects hits
//! into typed records. Absent documents and unresolvable filters come back
//! as `None` or an empty list; only store failures are errors.

pub mod category_repo;
pub mod title_repo;

pub use category_repo::CategoryRepo;
pub use title_repo::TitleRepo;

use async_trait::async_trait;
use movies_core::search::Page;

use crate::store::StoreError;

/// Point lookup and free-text search, implemented once per entity kind.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Record returned by a point lookup.
    type Record: Send;
    /// Record returned by search.
    type Summary: Send;

    /// Entity label used in not-found responses.
    const ENTITY: &'static str;

    async fn get_by_id(&self, id: &str) -> Result<Option<Self::Record>, StoreError>;

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Self::Summary>, StoreError>;
}
