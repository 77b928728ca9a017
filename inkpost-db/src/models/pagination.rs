//! Page/limit plumbing for list operations
//!
//! Listing queries bind `limit()`/`offset()` directly and wrap their rows
//! in [`Paginated`] together with the window-function total, so one query
//! serves both the page and the count.

use serde::{Deserialize, Serialize};

const MAX_PER_PAGE: u32 = 100;
const DEFAULT_PER_PAGE: u32 = 20;

/// A 1-indexed page request, clamped to sane bounds at construction.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Build a page request. Page 0 becomes 1; `per_page` is clamped to
    /// `1..=100`.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Value to bind for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    /// Value to bind for SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus the total row count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Number of pages the total spans; an empty result still counts as
    /// one page.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            return 1;
        }
        let pages = (self.total + self.per_page as i64 - 1) / self.per_page as i64;
        pages.min(u32::MAX as i64) as u32
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: i64, page: u32, per_page: u32) -> Paginated<()> {
        Paginated {
            items: vec![],
            total,
            page,
            per_page,
        }
    }

    #[test]
    fn offsets_follow_page_number() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(4, 20).offset(), 60);
        assert_eq!(Pagination::new(2, 7).limit(), 7);
    }

    #[test]
    fn bounds_are_clamped() {
        let p = Pagination::new(0, 0);
        assert_eq!((p.page, p.per_page), (1, 1));

        let p = Pagination::new(1, 10_000);
        assert_eq!(p.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(page_of(0, 1, 10).total_pages(), 1);
        assert_eq!(page_of(10, 1, 10).total_pages(), 1);
        assert_eq!(page_of(11, 1, 10).total_pages(), 2);
    }

    #[test]
    fn total_pages_survives_large_totals() {
        // Totals past u32::MAX must not wrap the page count
        let big = page_of(i64::from(u32::MAX) * 4, 1, 1);
        assert_eq!(big.total_pages(), u32::MAX);
    }

    #[test]
    fn has_next_respects_last_page() {
        assert!(page_of(30, 2, 10).has_next());
        assert!(!page_of(30, 3, 10).has_next());
        assert!(!page_of(0, 1, 10).has_next());
    }
}
