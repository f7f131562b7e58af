//! In-memory [`DocumentStore`] for tests.
//!
//! Point lookups read from inserted documents. Searches are recorded and
//! answered with the canned hits set for the collection, sliced by the
//! requested window, so callers can assert on the queries they built.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use movies_core::query::SearchQuery;
use movies_core::search::Window;
use serde_json::Value;

use crate::store::{Collection, Document, DocumentStore, Hit, StoreError};

/// One search issued against a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub collection: Collection,
    pub query: SearchQuery,
    pub window: Window,
}

#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<(Collection, String), Value>>,
    hits: Mutex<HashMap<Collection, Vec<Hit>>>,
    searches: Mutex<Vec<RecordedSearch>>,
    unavailable: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: Collection, id: &str, source: Value) {
        lock(&self.documents).insert((collection, id.to_string()), source);
    }

    /// Hits returned (before windowing) by every search on `collection`.
    pub fn set_hits(&self, collection: Collection, hits: Vec<Hit>) {
        lock(&self.hits).insert(collection, hits);
    }

    pub fn searches(&self) -> Vec<RecordedSearch> {
        lock(&self.searches).clone()
    }

    /// Make every subsequent call fail as if the store timed out.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Timeout { attempts: 1 })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        Ok(lock(&self.documents)
            .get(&(collection, id.to_string()))
            .map(|source| Document {
                id: id.to_string(),
                source: source.clone(),
            }))
    }

    async fn search(
        &self,
        collection: Collection,
        query: &SearchQuery,
        window: Window,
    ) -> Result<Vec<Hit>, StoreError> {
        self.check_available()?;
        lock(&self.searches).push(RecordedSearch {
            collection,
            query: query.clone(),
            window,
        });

        let hits = lock(&self.hits);
        let all = hits.get(&collection).map(Vec::as_slice).unwrap_or_default();
        let start = usize::try_from(window.offset).unwrap_or(usize::MAX).min(all.len());
        let end = start
            .saturating_add(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .min(all.len());
        Ok(all[start..end].to_vec())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
