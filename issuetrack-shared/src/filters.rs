//! Pagination and sort handling shared by every list operation.
//!
//! Clients supply `page`, `page_size` and `sort`; the engine validates them
//! (sort must come from the per-resource safelist, so no listing ever runs
//! with an unchecked sort column), derives the store query window, and
//! computes the response metadata.

use serde::Serialize;

use crate::validate::Validator;

/// Client-supplied paging and sorting parameters plus the safelist of sort
/// keys the owning resource accepts.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Sort key, optionally prefixed with `-` for descending order.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

/// Direction extracted from the sort key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Filters {
    pub fn new(
        page: i64,
        page_size: i64,
        sort: impl Into<String>,
        sort_safelist: &'static [&'static str],
    ) -> Self {
        Filters {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist,
        }
    }

    /// Checks paging bounds and sort key membership, collecting every
    /// violation into `v`.
    pub fn validate(&self, v: &mut Validator) {
        v.check(self.page > 0, "page", "must be greater than zero");
        v.check(self.page <= 10_000_000, "page", "must be a maximum of 10 million");
        v.check(self.page_size > 0, "page_size", "must be greater than zero");
        v.check(self.page_size <= 100, "page_size", "must be a maximum of 100");
        v.check(
            self.sort_safelist.contains(&self.sort.as_str()),
            "sort",
            "invalid sort value",
        );
    }

    /// The column to order by, stripped of any direction prefix.
    ///
    /// Panics when the sort key is not in the safelist; `validate` must have
    /// accepted the filters before a listing is executed.
    pub fn sort_column(&self) -> &str {
        for safe in self.sort_safelist {
            if self.sort == *safe {
                return self.sort.trim_start_matches('-');
            }
        }
        panic!("unsafe sort parameter: {}", self.sort)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Pagination metadata returned alongside every listing.
///
/// An empty result set yields the all-zero value rather than an error; this
/// is part of the listing contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    /// Computes metadata for a listing of `total_records` rows.
    ///
    /// # Example
    ///
    /// ```
    /// use issuetrack_shared::filters::Metadata;
    ///
    /// let metadata = Metadata::calculate(95, 1, 20);
    /// assert_eq!(metadata.last_page, 5);
    ///
    /// assert_eq!(Metadata::calculate(0, 1, 20), Metadata::default());
    /// ```
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records == 0 {
            return Metadata::default();
        }
        Metadata {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}
