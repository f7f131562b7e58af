//! Elasticsearch implementation of [`DocumentStore`].
//!
//! Wraps the engine's REST API (`GET /{index}/_doc/{id}` and
//! `POST /{index}/_search`) using [`reqwest`]. One pooled client is shared by
//! all requests; a semaphore caps the number of calls in flight and requests
//! that time out are retried a bounded number of times.

use std::time::Duration;

use async_trait::async_trait;
use movies_core::query::SearchQuery;
use movies_core::search::Window;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::store::{Collection, Document, DocumentStore, Hit, StoreError};

/// Connection settings for the Elasticsearch cluster.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL, e.g. `http://127.0.0.1:9200`.
    pub url: String,
    /// Maximum number of simultaneous calls.
    pub max_connections: usize,
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Extra attempts made when a call times out.
    pub max_retries: u32,
    /// Engine limit on `from + size` (`index.max_result_window`).
    pub max_result_window: u64,
    pub titles_index: String,
    pub categories_index: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9200".into(),
            max_connections: 5,
            timeout: Duration::from_secs(10),
            max_retries: 3,
            max_result_window: 10_000,
            titles_index: "movies".into(),
            categories_index: "genres".into(),
        }
    }
}

/// HTTP client for a single Elasticsearch cluster.
pub struct ElasticStore {
    client: reqwest::Client,
    base: Url,
    config: StoreConfig,
    permits: Semaphore,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default = "found_default")]
    found: bool,
    #[serde(rename = "_source", default)]
    source: Option<Value>,
}

fn found_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Value,
}

impl ElasticStore {
    /// Build the client. Fails only on an unusable URL or TLS backend setup.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let base = Url::parse(&config.url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {e}", config.url)))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(config.url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_connections)
            .build()?;

        Ok(Self {
            client,
            base,
            permits: Semaphore::new(config.max_connections.max(1)),
            config,
        })
    }

    /// Reject further calls. Calls already holding a connection finish.
    pub fn close(&self) {
        self.permits.close();
    }

    fn index(&self, collection: Collection) -> &str {
        match collection {
            Collection::Titles => &self.config.titles_index,
            Collection::Categories => &self.config.categories_index,
        }
    }

    /// Base URL with the given path segments appended (each one escaped).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request, retrying only when an attempt times out.
    ///
    /// `build` is called once per attempt. The returned body has already
    /// been read so a slow body also counts against the attempt.
    async fn send<F>(&self, build: F) -> Result<(StatusCode, String), StoreError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| StoreError::Closed)?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let result = match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    response.text().await.map(|body| (status, body))
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(pair) => return Ok(pair),
                Err(e) if e.is_timeout() && attempt <= self.config.max_retries => {
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        "Document store call timed out, retrying",
                    );
                }
                Err(e) if e.is_timeout() => {
                    tracing::error!(attempts = attempt, "Document store call timed out");
                    return Err(StoreError::Timeout { attempts: attempt });
                }
                Err(e) => return Err(StoreError::Transport(e)),
            }
        }
    }

    fn api_error(status: StatusCode, body: String) -> StoreError {
        StoreError::Api {
            status: status.as_u16(),
            body,
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(id: &str, body: &str) -> Result<T, StoreError> {
        serde_json::from_str(body).map_err(|e| StoreError::Decode {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DocumentStore for ElasticStore {
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let url = self.endpoint(&[self.index(collection), "_doc", id]);
        let (status, body) = self.send(|| self.client.get(url.clone())).await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(entity = collection.entity(), id, "Document not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::api_error(status, body));
        }

        let response: GetResponse = Self::parse(id, &body)?;
        match (response.found, response.source) {
            (true, Some(source)) => Ok(Some(Document {
                id: response.id,
                source,
            })),
            _ => Ok(None),
        }
    }

    async fn search(
        &self,
        collection: Collection,
        query: &SearchQuery,
        window: Window,
    ) -> Result<Vec<Hit>, StoreError> {
        let Some(window) = window.within(self.config.max_result_window) else {
            tracing::debug!(
                entity = collection.entity(),
                offset = window.offset,
                "Page lies beyond the result window, returning no hits",
            );
            return Ok(Vec::new());
        };

        let index = self.index(collection);
        let url = self.endpoint(&[index, "_search"]);
        let body = query.to_body(window);
        tracing::debug!(index, query = %body, "Searching document store");

        let (status, text) = self
            .send(|| self.client.post(url.clone()).json(&body))
            .await?;

        if status == StatusCode::NOT_FOUND {
            tracing::warn!(index, "Index does not exist, returning no hits");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Self::api_error(status, text));
        }

        let response: SearchResponse = Self::parse(index, &text)?;
        Ok(response
            .hits
            .hits
            .into_iter()
            .map(|raw| Hit {
                id: raw.id,
                score: raw.score,
                source: raw.source,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let url = self.base.clone();
        let (status, body) = self.send(|| self.client.get(url.clone())).await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, body))
        }
    }
}
