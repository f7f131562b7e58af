//! Pagination constants and helpers shared by every catalog endpoint.
//!
//! Pages are 1-based on the wire and translate to an `offset`/`limit`
//! [`Window`] when a query is sent to the document store.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// First page number.
pub const DEFAULT_PAGE_NUMBER: u32 = 1;

/// Default page size for listing and free-text search.
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 50;

/// Maximum page size for listing and free-text search.
pub const MAX_LIST_PAGE_SIZE: u32 = 100;

/// Default page size for similarity results.
pub const DEFAULT_SIMILAR_PAGE_SIZE: u32 = 10;

/// Maximum page size for similarity results.
pub const MAX_SIMILAR_PAGE_SIZE: u32 = 50;

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

/// Clamp a user-provided page size to `[1, max]`.
pub fn clamp_page_size(size: Option<u32>, default: u32, max: u32) -> u32 {
    size.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-provided page number to `>= 1`.
pub fn clamp_page_number(number: Option<u32>) -> u32 {
    number.unwrap_or(DEFAULT_PAGE_NUMBER).max(1)
}

// ---------------------------------------------------------------------------
// Page / Window
// ---------------------------------------------------------------------------

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Build a page, clamping both values into their legal ranges.
    pub fn new(number: Option<u32>, size: Option<u32>, default_size: u32, max_size: u32) -> Self {
        Self {
            number: clamp_page_number(number),
            size: clamp_page_size(size, default_size, max_size),
        }
    }

    /// Page bounds used by listing and free-text search.
    pub fn listing(number: Option<u32>, size: Option<u32>) -> Self {
        Self::new(number, size, DEFAULT_LIST_PAGE_SIZE, MAX_LIST_PAGE_SIZE)
    }

    /// Page bounds used by similarity queries.
    pub fn similar(number: Option<u32>, size: Option<u32>) -> Self {
        Self::new(number, size, DEFAULT_SIMILAR_PAGE_SIZE, MAX_SIMILAR_PAGE_SIZE)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// `(page_number - 1) * page_size`
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    pub fn window(&self) -> Window {
        Window {
            offset: self.offset(),
            limit: u64::from(self.size),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::listing(None, None)
    }
}

/// Raw `offset`/`limit` pair handed to the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl Window {
    /// Restrict the window to the first `result_window` hits of a result set.
    ///
    /// Returns `None` when the window starts at or past the limit, meaning the
    /// page is empty by definition.
    pub fn within(self, result_window: u64) -> Option<Window> {
        if self.offset >= result_window || self.limit == 0 {
            return None;
        }
        Some(Window {
            offset: self.offset,
            limit: self.limit.min(result_window - self.offset),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
