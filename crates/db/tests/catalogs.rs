//! Title and category catalogs running over `ElasticStore` and a fake node.

mod common;

use std::sync::Arc;

use common::FakeElastic;
use movies_core::search::Page;
use movies_core::sort::SortSpec;
use movies_db::repositories::{Catalog, CategoryRepo, TitleRepo};
use movies_db::{DocumentStore, ElasticStore};
use serde_json::json;

async fn seeded() -> (FakeElastic, TitleRepo, CategoryRepo) {
    let es = FakeElastic::start().await;
    es.insert("genres", "g1", json!({ "id": "g1", "name": "Drama" }));
    es.insert("genres", "g2", json!({ "id": "g2", "name": "Comedy" }));
    es.insert(
        "movies",
        "f1",
        json!({
            "id": "f1",
            "title": "Echo",
            "imdb_rating": 8.0,
            "description": null,
            "genres": ["Drama"],
            "actors": [{ "id": "a1", "name": "X" }],
            "writers": [],
            "directors": [],
        }),
    );
    for i in 0..15 {
        es.insert(
            "movies",
            &format!("s{i}"),
            json!({ "title": format!("Sequel {i}"), "imdb_rating": 5.0, "genres": ["Drama"] }),
        );
    }

    let store: Arc<dyn DocumentStore> = Arc::new(ElasticStore::new(es.config()).unwrap());
    let categories = CategoryRepo::new(Arc::clone(&store));
    let titles = TitleRepo::new(store, categories.clone());
    (es, titles, categories)
}

#[tokio::test]
async fn title_detail_resolves_categories_from_stored_names() {
    let (_es, titles, _) = seeded().await;

    let title = titles.get_by_id("f1").await.unwrap().unwrap();

    assert_eq!(title.id, "f1");
    assert_eq!(title.name, "Echo");
    let names: Vec<&str> = title.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Drama"]);
}

#[tokio::test]
async fn title_detail_keeps_all_genres_when_a_near_duplicate_ranks_first() {
    let es = FakeElastic::start().await;
    es.insert("genres", "g1", json!({ "name": "Drama" }));
    es.insert("genres", "g9", json!({ "name": "Dramas" }));
    es.insert("genres", "g2", json!({ "name": "Comedy" }));
    es.insert(
        "movies",
        "f7",
        json!({ "title": "Twofold", "genres": ["Drama", "Comedy"] }),
    );
    let store: Arc<dyn DocumentStore> = Arc::new(ElasticStore::new(es.config()).unwrap());
    let titles = TitleRepo::new(Arc::clone(&store), CategoryRepo::new(store));

    let title = titles.get_by_id("f7").await.unwrap().unwrap();

    let ids: Vec<&str> = title.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);
}

#[tokio::test]
async fn unknown_title_is_none() {
    let (_es, titles, _) = seeded().await;
    assert_eq!(titles.get_by_id("missing").await.unwrap(), None);
}

#[tokio::test]
async fn similar_excludes_reference_and_honours_page_size() {
    let (es, titles, _) = seeded().await;

    let page = titles.similar("f1", Page::similar(Some(1), Some(10))).await.unwrap();

    assert_eq!(page.len(), 10);
    assert!(page.iter().all(|s| s.id != "f1"));

    let (index, body) = es.bodies().pop().unwrap();
    assert_eq!(index, "movies");
    assert_eq!(body["sort"], json!([{ "imdb_rating": { "order": "desc" } }]));
    assert_eq!(body["query"]["bool"]["must_not"], json!([{ "term": { "_id": "f1" } }]));
    assert_eq!(body["query"]["bool"]["minimum_should_match"], 1);
    assert_eq!(body["size"], 10);
}

#[tokio::test]
async fn list_with_unknown_genre_is_empty() {
    let (es, titles, _) = seeded().await;

    let page = titles
        .list(SortSpec::default(), Some("unknown"), Page::listing(None, None))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(es.bodies().is_empty());
}

#[tokio::test]
async fn list_with_known_genre_sends_term_filter() {
    let (es, titles, _) = seeded().await;

    titles
        .list(SortSpec::parse("imdb_rating"), Some("g2"), Page::listing(Some(2), Some(3)))
        .await
        .unwrap();

    let (_, body) = es.bodies().pop().unwrap();
    assert_eq!(body["query"], json!({ "term": { "genres": "Comedy" } }));
    assert_eq!(body["sort"], json!([{ "imdb_rating": { "order": "asc" } }]));
    assert_eq!(body["from"], 3);
    assert_eq!(body["size"], 3);
}

#[tokio::test]
async fn list_never_exceeds_page_size() {
    let (_es, titles, _) = seeded().await;

    let page = titles
        .list(SortSpec::default(), None, Page::listing(Some(1), Some(4)))
        .await
        .unwrap();

    assert_eq!(page.len(), 4);
}

#[tokio::test]
async fn genre_list_and_lookup() {
    let (_es, _, categories) = seeded().await;

    let all = categories.list(Page::listing(None, None)).await.unwrap();
    assert_eq!(all.len(), 2);

    let drama = categories.get_by_id("g1").await.unwrap().unwrap();
    assert_eq!(drama.name, "Drama");
    assert_eq!(categories.get_by_id("g9").await.unwrap(), None);
}
