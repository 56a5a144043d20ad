//! Pagination summary for list responses
//!
//! The summary is computed once per list request from the total count of
//! matching documents and the effective page/limit, and returned alongside
//! the page of results. Wire names are part of the public API contract:
//! `page`, `limit`, `numberOfPages`, `prev`, `next`.
//!
//! # Example
//!
//! ```rust
//! use souk_service::query::PaginationSummary;
//!
//! let summary = PaginationSummary::new(2, 5, 12);
//! assert_eq!(summary.number_of_pages, 3);
//! assert_eq!(summary.prev, Some(1));
//! assert_eq!(summary.next, Some(3));
//! ```

use serde::{Deserialize, Serialize};

/// Default page size when the request carries none.
pub const DEFAULT_LIMIT: u64 = 5;

/// The computed page/limit/count/next/prev structure returned with a list
/// result. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total pages for the matching set, rounded up
    pub number_of_pages: u64,
    /// Previous page, present iff documents were skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<u64>,
    /// Next page, present iff more documents remain past this page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
}

impl PaginationSummary {
    /// Compute the summary for `page`/`limit` over `total` matching
    /// documents.
    ///
    /// `prev` is present iff `skip > 0`; `next` is present iff
    /// `page * limit < total`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use souk_service::query::PaginationSummary;
    ///
    /// let first = PaginationSummary::new(1, 5, 12);
    /// assert_eq!(first.prev, None);
    /// assert_eq!(first.next, Some(2));
    ///
    /// let last = PaginationSummary::new(3, 5, 12);
    /// assert_eq!(last.prev, Some(2));
    /// assert_eq!(last.next, None);
    /// ```
    #[must_use]
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let skip = (page - 1) * limit;
        Self {
            page,
            limit,
            number_of_pages: total.div_ceil(limit),
            prev: (skip > 0).then(|| page - 1),
            next: (page * limit < total).then(|| page + 1),
        }
    }

    /// Documents skipped before this page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}
