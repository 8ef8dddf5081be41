//! Response envelope for a single page of results.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Number of pages needed to show `total` items at `page_size` per page.
///
/// Zero items need zero pages.
///
/// ```
/// use pagination::total_pages;
///
/// assert_eq!(total_pages(0, 10), 0);
/// assert_eq!(total_pages(21, 10), 3);
/// ```
#[must_use]
pub const fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64)
}

/// One page of an ordered result set plus its global metadata.
///
/// Serialises as `{ "data": [...], "page": n, "total": n, "totalPages": n }`.
///
/// ## Invariants
/// - `data.len() <= page_size` of the originating request.
/// - `total_pages == ceil(total / page_size)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    data: Vec<T>,
    page: u32,
    total: u64,
    total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the rows fetched for `request` and the total
    /// number of rows matching the same filter.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            page: request.page(),
            total,
            total_pages: total_pages(total, request.page_size()),
        }
    }

    /// Rows on this page, in result order.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of rows matching the filter across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages needed to show every matching row.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Consume the page and return its rows.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Convert every row while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
