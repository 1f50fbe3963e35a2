//! Pagination state.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Local pagination: a 1-based current page over a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// Creates pagination on page 1. `page_size` must be non-zero.
    pub(crate) fn new(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    /// Returns the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows; at least 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Moves to `page`, clamped to `[1, total_pages]`, and returns it.
    pub fn set_page(&mut self, page: usize, total: usize) -> usize {
        self.page = clamp_page(page, self.total_pages(total));
        self.page
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Index range of the current page within `total` rows.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }
}

/// Clamps a requested page to `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Pagination metadata supplied by the caller in server-delegated mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerPage {
    /// Current page (1-based).
    pub current_page: usize,
    /// Total number of records across all pages.
    pub total_count: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether a next page exists.
    pub has_next_page: bool,
    /// Whether a previous page exists.
    pub has_prev_page: bool,
}

impl Default for ServerPage {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_count: 0,
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
        }
    }
}

/// Pagination metadata used to drive page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current page (1-based).
    pub page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Total number of rows (after filtering in local mode).
    pub total_count: usize,
    /// Whether the "previous" control is enabled.
    pub can_prev: bool,
    /// Whether the "next" control is enabled.
    pub can_next: bool,
}

impl PageInfo {
    pub(crate) fn local(pagination: &Pagination, total: usize) -> Self {
        let total_pages = pagination.total_pages(total);
        let page = pagination.page();
        Self {
            page,
            total_pages,
            total_count: total,
            can_prev: page > 1,
            can_next: page < total_pages,
        }
    }

    pub(crate) fn server(page: &ServerPage) -> Self {
        Self {
            page: page.current_page,
            total_pages: page.total_pages,
            total_count: page.total_count,
            can_prev: page.has_prev_page,
            can_next: page.has_next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let pagination = Pagination::new(10);
        assert_eq!(pagination.total_pages(0), 1);
        assert_eq!(pagination.total_pages(10), 1);
        assert_eq!(pagination.total_pages(11), 2);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut pagination = Pagination::new(10);
        assert_eq!(pagination.set_page(0, 25), 1);
        assert_eq!(pagination.set_page(7, 25), 3);
        assert_eq!(pagination.set_page(2, 25), 2);
        assert_eq!(pagination.set_page(4, 0), 1);
    }

    #[test]
    fn test_range() {
        let mut pagination = Pagination::new(10);
        assert_eq!(pagination.range(25), 0..10);
        pagination.set_page(3, 25);
        assert_eq!(pagination.range(25), 20..25);
        assert_eq!(pagination.range(0), 0..0);
    }

    #[test]
    fn test_local_page_info_boundaries() {
        let mut pagination = Pagination::new(5);
        let first = PageInfo::local(&pagination, 12);
        assert!(!first.can_prev);
        assert!(first.can_next);

        pagination.set_page(3, 12);
        let last = PageInfo::local(&pagination, 12);
        assert!(last.can_prev);
        assert!(!last.can_next);
    }

    #[test]
    fn test_server_page_info_uses_flags() {
        let info = PageInfo::server(&ServerPage {
            current_page: 2,
            total_count: 40,
            total_pages: 4,
            has_next_page: true,
            has_prev_page: true,
        });
        assert_eq!(info.page, 2);
        assert!(info.can_prev && info.can_next);
    }
}
