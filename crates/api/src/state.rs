use std::sync::Arc;

use movies_db::repositories::{CategoryRepo, TitleRepo};
use movies_db::SharedStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at start-up and cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Document store client, shared by both catalogs.
    pub store: SharedStore,
    /// Genre catalog.
    pub categories: CategoryRepo,
    /// Film catalog (resolves genre filters through `categories`).
    pub titles: TitleRepo,
}

impl AppState {
    pub fn new(config: ServerConfig, store: SharedStore) -> Self {
        let categories = CategoryRepo::new(Arc::clone(&store));
        let titles = TitleRepo::new(Arc::clone(&store), categories.clone());
        Self {
            config: Arc::new(config),
            store,
            categories,
            titles,
        }
    }
}
