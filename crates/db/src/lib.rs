//! Document store access for the movies catalog.
//!
//! Holds the [`DocumentStore`] seam and its Elasticsearch implementation,
//! stored document shapes, hit projection, and the title/category catalogs.

use std::sync::Arc;

pub mod elastic;
pub mod models;
pub mod projection;
pub mod repositories;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use elastic::{ElasticStore, StoreConfig};
pub use store::{Collection, DocumentStore, StoreError};

/// Shared handle to the document store used by every catalog.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Create the Elasticsearch client from its connection settings.
pub fn create_store(config: StoreConfig) -> Result<Arc<ElasticStore>, StoreError> {
    ElasticStore::new(config).map(Arc::new)
}

/// Verify the document store is reachable.
pub async fn health_check(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store.ping().await
}
