//! Pagination utilities

use super::filter::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use serde::Serialize;

/// Read window derived from a page request
///
/// # Example
/// ```
/// use sales_query::core::query::PageWindow;
///
/// let window = PageWindow::new(3, 10);
/// assert_eq!(window.offset(), 20);
/// assert_eq!(window.limit(), 10);
///
/// // page <= 0 is page 1, page_size <= 0 is the default size
/// assert_eq!(PageWindow::new(-5, 0), PageWindow::new(1, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: u64,
    page_size: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    /// Normalize a requested page and size
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = if page <= 0 { DEFAULT_PAGE } else { page };
        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            page: page.unsigned_abs(),
            page_size: page_size.unsigned_abs(),
        }
    }

    /// Page number (starts at 1)
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of rows on this page
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Ceiling of `total / page_size`; zero when there is nothing to page
    pub fn total_pages(&self, total: u64) -> u64 {
        if total == 0 {
            0
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// Apply the window to an already ordered sequence
    pub fn slice<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        rows.into_iter().skip(offset).take(limit).collect()
    }
}

/// One page of results plus paging metadata
///
/// Serializes as `{ transactions, total, page, pageSize, totalPages }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Rows of the current page only
    pub transactions: Vec<T>,

    /// Total number of matches (before pagination)
    pub total: u64,

    /// Current page number (starts at 1)
    pub page: u64,

    /// Number of rows per page
    pub page_size: u64,

    /// Total number of pages
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    /// Assemble a page from its rows, the total match count and the window used
    pub fn new(transactions: Vec<T>, total: u64, window: PageWindow) -> Self {
        Self {
            transactions,
            total,
            page: window.page(),
            page_size: window.page_size(),
            total_pages: window.total_pages(total),
        }
    }
}
