//! Page-number pagination primitives shared by list endpoints.
//!
//! [`PageRequest`] normalises the 1-based `page` and `limit` pair supplied by
//! callers and derives the row window to read; [`Page`] is the envelope that
//! carries one slice of results together with the total item count.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::from_raw(Some(2), Some(2));
//! assert_eq!(request.offset(), 2);
//!
//! let rows = [5, 4, 3, 2, 1];
//! let page = Page::from_slice(&rows, request);
//! assert_eq!(page.items(), &[3, 2]);
//! assert_eq!(page.total(), 5);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not supply a limit.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures raised by [`PageRequest::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// The page size falls outside `1..=max`.
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange {
        /// Largest accepted page size.
        max: u32,
    },
}

/// A validated 1-based page number and page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Strict constructor rejecting values outside the invariants.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` is zero or `limit` is outside
    /// `1..=MAX_LIMIT`.
    pub const fn try_new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// Lenient constructor for raw query values.
    ///
    /// Missing values take the defaults, pages below one clamp to one and the
    /// limit clamps into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn from_raw(page: Option<i64>, limit: Option<i64>) -> Self {
        let clamped_page = page.map_or(DEFAULT_PAGE, |value| {
            u32::try_from(value.max(1)).unwrap_or(u32::MAX)
        });
        let clamped_limit = limit.map_or(DEFAULT_LIMIT, |value| {
            u32::try_from(value.clamp(1, i64::from(MAX_LIMIT))).unwrap_or(MAX_LIMIT)
        });
        Self {
            page: clamped_page,
            limit: clamped_limit,
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// The page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Index window of this page within a collection of `len` items.
    ///
    /// Pages past the end yield an empty range anchored at `len`.
    #[must_use]
    pub fn bounds(self, len: usize) -> Range<usize> {
        let start = usize::try_from(self.offset()).map_or(len, |offset| offset.min(len));
        let end = start.saturating_add(self.limit as usize).min(len);
        start..end
    }
}

/// One page of results plus the size of the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Wrap an already sliced set of items.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the envelope and return the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Size of the full collection, independent of the requested page.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }
}

impl<T: Clone> Page<T> {
    /// Slice an in-memory collection according to `request`.
    #[must_use]
    pub fn from_slice(all: &[T], request: PageRequest) -> Self {
        let window = request.bounds(all.len());
        let items = all.get(window).map(<[T]>::to_vec).unwrap_or_default();
        Self {
            items,
            total: all.len() as u64,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page normalisation and slicing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some(3), Some(25), 3, 25)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(-4), Some(-1), 1, 1)]
    #[case(Some(2), Some(5_000), 2, MAX_LIMIT)]
    #[case(Some(i64::MAX), Some(10), u32::MAX, 10)]
    fn from_raw_normalises_values(
        #[case] page: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::from_raw(page, limit);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(0, 10, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::LimitOutOfRange { max: MAX_LIMIT })]
    #[case(1, MAX_LIMIT + 1, PageRequestError::LimitOutOfRange { max: MAX_LIMIT })]
    fn try_new_rejects_out_of_range_values(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::try_new(page, limit), Err(expected));
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(4, 3, 9)]
    fn offset_skips_previous_pages(#[case] page: u32, #[case] limit: u32, #[case] expected: u64) {
        let request = PageRequest::try_new(page, limit).expect("valid request");
        assert_eq!(request.offset(), expected);
    }

    #[rstest]
    #[case(1, 2, 5, 0..2)]
    #[case(3, 2, 5, 4..5)]
    #[case(4, 2, 5, 5..5)]
    #[case(1, 10, 0, 0..0)]
    fn bounds_clamp_to_collection(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] len: usize,
        #[case] expected: Range<usize>,
    ) {
        let request = PageRequest::try_new(page, limit).expect("valid request");
        assert_eq!(request.bounds(len), expected);
    }

    #[rstest]
    fn out_of_range_page_is_empty_but_keeps_total() {
        let request = PageRequest::try_new(9, 3).expect("valid request");
        let page = Page::from_slice(&[1, 2, 3, 4], request);
        assert!(page.items().is_empty());
        assert_eq!(page.total(), 4);
    }

    #[rstest]
    fn serialises_items_and_total() {
        let page = Page::new(vec!["a"], 1, PageRequest::default());
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["items"], serde_json::json!(["a"]));
        assert_eq!(value["total"], 1);
    }
}
