//! Fake Elasticsearch node for exercising `ElasticStore` over real HTTP.
//!
//! Serves `GET /`, `GET /{index}/_doc/{id}` and `POST /{index}/_search` from
//! in-memory state. Search applies `from`/`size` and `_id` exclusions found
//! in `bool.must_not`, and records every request body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use movies_db::StoreConfig;
use serde_json::{json, Value};

#[derive(Default)]
pub struct FakeState {
    docs: Mutex<HashMap<(String, String), Value>>,
    hits: Mutex<HashMap<String, Vec<(String, Value)>>>,
    bodies: Mutex<Vec<(String, Value)>>,
    slow_calls: AtomicU32,
    slow_delay_ms: AtomicU32,
    pub calls: AtomicU32,
}

pub struct FakeElastic {
    pub url: String,
    pub state: Arc<FakeState>,
}

impl FakeElastic {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/", get(root))
            .route("/{index}/_doc/{id}", get(get_doc))
            .route("/{index}/_search", post(search))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Store config pointing at this node with a short timeout.
    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            url: self.url.clone(),
            timeout: Duration::from_millis(200),
            max_retries: 2,
            ..Default::default()
        }
    }

    pub fn insert(&self, index: &str, id: &str, source: Value) {
        self.state
            .docs
            .lock()
            .unwrap()
            .insert((index.to_string(), id.to_string()), source.clone());
        self.state
            .hits
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .push((id.to_string(), source));
    }

    /// Create an index with no documents.
    pub fn create_index(&self, index: &str) {
        self.state
            .hits
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default();
    }

    /// Delay the next `count` requests by `delay_ms` milliseconds.
    pub fn slow_down(&self, count: u32, delay_ms: u32) {
        self.state.slow_delay_ms.store(delay_ms, Ordering::SeqCst);
        self.state.slow_calls.store(count, Ordering::SeqCst);
    }

    pub fn bodies(&self) -> Vec<(String, Value)> {
        self.state.bodies.lock().unwrap().clone()
    }

    pub fn calls(&self) -> u32 {
        self.state.calls.load(Ordering::SeqCst)
    }
}

async fn maybe_stall(state: &FakeState) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let remaining = state.slow_calls.load(Ordering::SeqCst);
    if remaining > 0 {
        state.slow_calls.store(remaining - 1, Ordering::SeqCst);
        let delay = state.slow_delay_ms.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(u64::from(delay))).await;
    }
}

async fn root(State(state): State<Arc<FakeState>>) -> Json<Value> {
    maybe_stall(&state).await;
    Json(json!({ "tagline": "You Know, for Search" }))
}

async fn get_doc(
    State(state): State<Arc<FakeState>>,
    Path((index, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    maybe_stall(&state).await;
    let doc = state.docs.lock().unwrap().get(&(index.clone(), id.clone())).cloned();
    match doc {
        Some(source) => (
            StatusCode::OK,
            Json(json!({ "_index": index, "_id": id, "found": true, "_source": source })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "_index": index, "_id": id, "found": false })),
        ),
    }
}

fn excluded_ids(body: &Value) -> Vec<String> {
    body["query"]["bool"]["must_not"]
        .as_array()
        .map(|clauses| {
            clauses
                .iter()
                .filter_map(|c| c["term"]["_id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn search(
    State(state): State<Arc<FakeState>>,
    Path(index): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    maybe_stall(&state).await;
    state.bodies.lock().unwrap().push((index.clone(), body.clone()));

    if index == "broken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "type": "parsing_exception" }, "status": 400 })),
        );
    }

    let Some(all) = state.hits.lock().unwrap().get(&index).cloned() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "type": "index_not_found_exception" }, "status": 404 })),
        );
    };

    let excluded = excluded_ids(&body);
    let from = body["from"].as_u64().unwrap_or(0) as usize;
    let size = body["size"].as_u64().unwrap_or(10) as usize;
    let hits: Vec<Value> = all
        .into_iter()
        .filter(|(id, _)| !excluded.contains(id))
        .skip(from)
        .take(size)
        .map(|(id, source)| json!({ "_index": index, "_id": id, "_score": 1.0, "_source": source }))
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "hits": { "total": { "value": hits.len() }, "hits": hits } })),
    )
}
