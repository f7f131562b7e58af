//! Shared query parameter types for API handlers.
//!
//! Bounds are enforced with `validator` before a handler touches the store;
//! [`Page`] clamps again so the catalogs never see an out-of-range window.

use movies_core::search::Page;
use movies_core::sort::{SortSpec, DEFAULT_SORT};
use serde::Deserialize;
use validator::Validate;

/// `?page_number=&page_size=` for listing endpoints (size 1..=100).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 1))]
    pub page_number: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page::listing(self.page_number, self.page_size)
    }
}

/// `?page_number=&page_size=` for similarity results (size 1..=50).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SimilarPageParams {
    #[validate(range(min = 1))]
    pub page_number: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub page_size: Option<u32>,
}

impl SimilarPageParams {
    pub fn page(&self) -> Page {
        Page::similar(self.page_number, self.page_size)
    }
}

/// `?query=&page_number=&page_size=` for free-text search.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 1))]
    pub query: String,
    #[validate(range(min = 1))]
    pub page_number: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

impl SearchParams {
    pub fn page(&self) -> Page {
        Page::listing(self.page_number, self.page_size)
    }
}

/// `?sort=&genre=&page_number=&page_size=` for the title listing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FilmListParams {
    /// `[-]field`, default [`DEFAULT_SORT`].
    pub sort: Option<String>,
    /// Genre id to filter by.
    pub genre: Option<String>,
    #[validate(range(min = 1))]
    pub page_number: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
}

impl FilmListParams {
    /// Parsed `sort`, falling back to [`DEFAULT_SORT`] when absent.
    pub fn sort(&self) -> SortSpec {
        SortSpec::parse(self.sort.as_deref().unwrap_or(DEFAULT_SORT))
    }

    /// Genre filter, ignoring an empty `?genre=`.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.trim().is_empty())
    }

    pub fn page(&self) -> Page {
        Page::listing(self.page_number, self.page_size)
    }
}
