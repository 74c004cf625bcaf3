//! Pagination types for list operations.
//!
//! Pages are 1-indexed. A requested page outside `[1, total_pages]` is clamped
//! into range rather than rejected, so an empty result set still reports page 1.

use crate::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};

/// The resolved slice of a result set: which page is served and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The served page number after clamping (always >= 1).
    pub page: u64,
    /// The number of items per page.
    pub page_size: u64,
    /// `ceil(total_items / page_size)`; zero for an empty set.
    pub total_pages: u64,
    /// Number of items skipped before this page.
    pub offset: u64,
}

impl PageWindow {
    /// Page size used when a listing does not name one.
    pub const DEFAULT_SIZE: i64 = 10;
    /// Larger requested page sizes are capped to this.
    pub const MAX_SIZE: i64 = 100;

    /// Computes the page window.
    ///
    /// `page < 1` serves page 1, `page > total_pages` serves the last page.
    /// `page_size` must be at least 1.
    pub fn compute(total_items: u64, page: i64, page_size: i64) -> RosterResult<Self> {
        if page_size < 1 {
            return Err(RosterError::validation("pageSize must be at least 1"));
        }
        let page_size = page_size.min(Self::MAX_SIZE).unsigned_abs();
        let total_pages = total_items.div_ceil(page_size);

        let requested = u64::try_from(page).unwrap_or(0);
        let page = requested.min(total_pages).max(1);

        Ok(Self {
            page,
            page_size,
            total_pages,
            offset: (page - 1) * page_size,
        })
    }

    /// Returns the index range `[offset, offset + page_size)` clipped to `len`.
    #[must_use]
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let end = start
            .saturating_add(usize::try_from(self.page_size).unwrap_or(usize::MAX))
            .min(len);
        start..end
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of items matching the query across all pages.
    pub total_items: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// The served page number (1-indexed).
    pub page: u64,
    /// The number of items per page.
    pub page_size: u64,
}

impl PageInfo {
    /// Creates page info from a computed window.
    #[must_use]
    pub const fn new(window: &PageWindow, total_items: u64) -> Self {
        Self {
            total_items,
            total_pages: window.total_pages,
            page: window.page,
            page_size: window.page_size,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub const fn new(content: Vec<T>, info: PageInfo) -> Self {
        Self { content, info }
    }

    /// Slices the window out of the full, already ordered, result set.
    pub fn slice(mut items: Vec<T>, window: &PageWindow) -> Self {
        let total_items = items.len() as u64;
        let range = window.range(items.len());
        let content: Vec<T> = items.drain(range).collect();
        Self::new(content, PageInfo::new(window, total_items))
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            info: self.info,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(total: u64, page: i64, size: i64) -> (u64, u64, u64) {
        let w = PageWindow::compute(total, page, size).unwrap();
        (w.page, w.total_pages, w.offset)
    }

    #[test]
    fn test_window_empty_set() {
        assert_eq!(window(0, 1, 10), (1, 0, 0));
        assert_eq!(window(0, 5, 10), (1, 0, 0));
    }

    #[test]
    fn test_window_middle_and_last_page() {
        assert_eq!(window(25, 2, 10), (2, 3, 10));
        assert_eq!(window(25, 3, 10), (3, 3, 20));
    }

    #[test]
    fn test_window_clamps_out_of_range_pages() {
        assert_eq!(window(25, 0, 10), (1, 3, 0));
        assert_eq!(window(25, -4, 10), (1, 3, 0));
        assert_eq!(window(25, 99, 10), (3, 3, 20));
    }

    #[test]
    fn test_window_exact_multiple() {
        assert_eq!(window(20, 2, 10), (2, 2, 10));
        assert_eq!(window(20, 3, 10), (2, 2, 10));
    }

    #[test]
    fn test_window_rejects_non_positive_size() {
        assert!(matches!(
            PageWindow::compute(10, 1, 0),
            Err(RosterError::Validation(_))
        ));
        assert!(PageWindow::compute(10, 1, -3).is_err());
    }

    #[test]
    fn test_window_caps_page_size() {
        let w = PageWindow::compute(1000, 1, 5000).unwrap();
        assert_eq!(w.page_size, PageWindow::MAX_SIZE.unsigned_abs());
        assert_eq!(w.total_pages, 10);
    }

    #[test]
    fn test_page_slice_last_page_is_partial() {
        let items: Vec<i32> = (1..=25).collect();
        let w = PageWindow::compute(25, 3, 10).unwrap();
        let page = Page::slice(items, &w);
        assert_eq!(page.content, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.info.total_items, 25);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.info.page, 3);
    }

    #[test]
    fn test_page_slice_empty() {
        let w = PageWindow::compute(0, 1, 10).unwrap();
        let page: Page<i32> = Page::slice(Vec::new(), &w);
        assert!(page.is_empty());
        assert_eq!(page.info.page, 1);
        assert_eq!(page.info.total_pages, 0);
    }

    #[test]
    fn test_page_map() {
        let w = PageWindow::compute(3, 1, 10).unwrap();
        let page = Page::slice(vec![1, 2, 3], &w);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.content, vec![2, 4, 6]);
        assert_eq!(mapped.len(), 3);
    }
}
