//! Request handlers for films and genres.
//!
//! Handlers validate query parameters, delegate to the catalogs in
//! `movies_db`, and map errors via [`AppError`].

pub mod films;
pub mod genres;

use movies_core::error::CoreError;
use movies_db::repositories::Catalog;

use crate::error::{AppError, AppResult};

/// Point lookup that turns an absent record into a 404.
pub(crate) async fn find_or_404<C: Catalog>(catalog: &C, id: &str) -> AppResult<C::Record> {
    catalog.get_by_id(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: C::ENTITY,
            id: id.to_string(),
        })
    })
}
