//! Page cursor over the filtered event list.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Page sizes the page-size selector offers.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Page size on first render.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rejected pagination input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    /// Page size is not one of [`PAGE_SIZE_OPTIONS`].
    #[error("unsupported page size {0}")]
    UnsupportedPageSize(usize),
}

/// Zero-based page index plus page size.
///
/// Deserialization applies the same page-size check as
/// [`Pagination::set_page_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPagination")]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

#[derive(Deserialize)]
struct RawPagination {
    page: usize,
    page_size: usize,
}

impl TryFrom<RawPagination> for Pagination {
    type Error = PaginationError;

    fn try_from(raw: RawPagination) -> Result<Self, Self::Error> {
        if !PAGE_SIZE_OPTIONS.contains(&raw.page_size) {
            return Err(PaginationError::UnsupportedPageSize(raw.page_size));
        }
        Ok(Self {
            page: raw.page,
            page_size: raw.page_size,
        })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Current zero-based page
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move to a page. Out-of-range pages are accepted here and clamped by
    /// [`Pagination::clamp_to`] once the list length is known.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change rows per page. Always resets to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::UnsupportedPageSize`] for sizes the selector
    /// does not offer; the cursor is left untouched.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PaginationError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(PaginationError::UnsupportedPageSize(page_size));
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Number of pages for `total` rows (0 when empty).
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Pull the page index back onto the last page when the list shrank.
    ///
    /// Returns `true` if the page changed.
    pub fn clamp_to(&mut self, total: usize) -> bool {
        let last = self.page_count(total).saturating_sub(1);
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }

    /// Index range of the current page within a list of `total` rows.
    ///
    /// ```
    /// use eventboard_core::pagination::Pagination;
    ///
    /// let mut pagination = Pagination::default();
    /// pagination.set_page(2);
    /// assert_eq!(pagination.window(23), 20..23);
    /// ```
    #[must_use]
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// The current page of `items`
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window(items.len())]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deserialization_rejects_unsupported_page_size() {
        let error = serde_json::from_str::<Pagination>(r#"{"page":0,"page_size":0}"#).unwrap_err();
        assert!(error.to_string().contains("unsupported page size 0"));

        let pagination: Pagination = serde_json::from_str(r#"{"page":2,"page_size":25}"#).unwrap();
        assert_eq!((pagination.page(), pagination.page_size()), (2, 25));
    }

    #[test]
    fn first_and_last_page_of_twenty_three() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.window(23), 0..10);

        pagination.set_page(2);
        assert_eq!(pagination.window(23), 20..23);
        assert_eq!(pagination.page_count(23), 3);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut pagination = Pagination::default();
        pagination.set_page(3);

        assert_eq!(pagination.set_page_size(25), Ok(()));

        assert_eq!(pagination.page(), 0);
        assert_eq!(pagination.page_size(), 25);
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        let mut pagination = Pagination::default();
        pagination.set_page(1);

        assert_eq!(
            pagination.set_page_size(7),
            Err(PaginationError::UnsupportedPageSize(7))
        );
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn clamp_moves_to_last_page() {
        let mut pagination = Pagination::default();
        pagination.set_page(4);

        assert!(pagination.clamp_to(12));
        assert_eq!(pagination.page(), 1);
        assert!(!pagination.clamp_to(12));
    }

    #[test]
    fn clamp_on_empty_list_goes_to_first_page() {
        let mut pagination = Pagination::default();
        pagination.set_page(2);

        pagination.clamp_to(0);

        assert_eq!(pagination.page(), 0);
        assert_eq!(pagination.window(0), 0..0);
    }

    #[test]
    fn slice_returns_current_rows() {
        let rows: Vec<u32> = (0..12).collect();
        let mut pagination = Pagination::default();
        pagination.set_page_size(5).ok();
        pagination.set_page(2);

        assert_eq!(pagination.slice(&rows), &[10, 11]);
    }

    proptest! {
        #[test]
        fn window_stays_in_bounds(total in 0usize..500, page in 0usize..100, size_index in 0usize..3) {
            let mut pagination = Pagination::default();
            pagination.set_page_size(PAGE_SIZE_OPTIONS[size_index]).ok();
            pagination.set_page(page);

            let window = pagination.window(total);

            prop_assert!(window.start <= window.end);
            prop_assert!(window.end <= total);
            prop_assert!(window.len() <= pagination.page_size());
        }

        #[test]
        fn clamped_page_is_never_empty_unless_list_is(total in 1usize..500, page in 0usize..100) {
            let mut pagination = Pagination::default();
            pagination.set_page(page);
            pagination.clamp_to(total);

            prop_assert!(!pagination.window(total).is_empty());
        }
    }
}
