//! Pagination metadata reported by collection endpoints.

use serde::{Deserialize, Serialize};

/// Page bookkeeping from the last collection fetch.
///
/// Replaced wholesale on every collection response that carries it. It is
/// not touched by cache writes or deletes, so it goes stale between
/// fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    /// Current page number (the panel calls it `current_page`).
    #[serde(rename = "current_page")]
    pub current: u32,

    /// Total number of entities across all pages.
    pub total: u32,

    /// Number of entities on this page.
    pub count: u32,

    /// Page size used by the panel.
    pub per_page: u32,

    /// Total number of pages.
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Check if the current page is the last one.
    pub fn is_last_page(&self) -> bool {
        self.current >= self.total_pages
    }
}
