use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use movies_db::testing::MemoryStore;
use movies_db::store::Hit;
use movies_db::{Collection, StoreConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use movies_api::config::ServerConfig;
use movies_api::router::build_app_router;
use movies_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store: StoreConfig {
            timeout: Duration::from_millis(200),
            ..StoreConfig::default()
        },
    }
}

/// Build the full application router over an in-memory store.
///
/// Goes through the same [`build_app_router`] as `main.rs`, so tests
/// exercise the production middleware stack.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_router(AppState::new(test_config(), store))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store seeded with two genres and three films.
///
/// `f1` is the film whose neighbours get looked up. Title searches answer
/// with all three films, best rated first.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());

    store.insert(Collection::Categories, "g1", json!({ "name": "Comedy" }));
    store.insert(Collection::Categories, "g2", json!({ "name": "Drama" }));
    store.set_hits(
        Collection::Categories,
        vec![
            Hit::new("g1", json!({ "name": "Comedy" })),
            Hit::new("g2", json!({ "name": "Drama" })),
        ],
    );

    store.insert(
        Collection::Titles,
        "f1",
        json!({
            "title": "Echo",
            "imdb_rating": 7.1,
            "description": "A sound returns",
            "genres": ["Comedy"],
            "actors": [{ "id": "p1", "name": "Ann Lee" }],
            "writers": [],
            "directors": [{ "id": "p2", "name": "Bo Ray" }],
        }),
    );
    store.set_hits(
        Collection::Titles,
        vec![
            Hit::new("f2", json!({ "title": "Echoes", "imdb_rating": 8.4 })),
            Hit::new("f3", json!({ "title": "Silence", "imdb_rating": 6.0 })),
            Hit::new("f4", json!({ "title": "Noise", "imdb_rating": null })),
        ],
    );

    store
}
