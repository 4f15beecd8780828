//! Pagination utilities for the query engine
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page index
    pub current_page: usize,
    /// items per page
    pub page_size: usize,
}

impl Pagination {
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self { current_page, page_size }
    }

    /// Clamp to sane values and return `(start, size)` for slicing.
    pub fn normalize(self) -> (usize, usize) {
        let page = self.current_page.max(1);
        let size = self.page_size.max(1);
        ((page - 1).saturating_mul(size), size)
    }

    /// The `[start, end)` window of this page within `total` items; empty
    /// when the page lies past the end.
    pub fn window(self, total: usize) -> std::ops::Range<usize> {
        let (start, size) = self.normalize();
        let start = start.min(total);
        let end = start.saturating_add(size).min(total);
        start..end
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { current_page: 1, page_size: DEFAULT_PAGE_SIZE } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (start, size) = Pagination::new(0, 0).normalize();
        assert_eq!(start, 0);
        assert_eq!(size, 1);
    }

    #[test]
    fn normalize_keeps_large_sizes() {
        let (start, size) = Pagination::new(5, 1000).normalize();
        assert_eq!(start, 4000);
        assert_eq!(size, 1000);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.current_page, 1);
        assert_eq!(d.page_size, 10);
    }

    #[test]
    fn window_past_the_end_is_empty() {
        assert_eq!(Pagination::new(3, 10).window(25), 20..25);
        assert!(Pagination::new(4, 10).window(25).is_empty());
        assert!(Pagination::new(usize::MAX, 100).window(5).is_empty());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let p: Pagination = serde_json::from_str(r#"{"currentPage": 2}"#).unwrap();
        assert_eq!(p, Pagination::new(2, 10));
    }
}
