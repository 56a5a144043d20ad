//! Query building for list endpoints
//!
//! This module turns raw request parameters into executable list queries.
//! The pieces, in the order a list request flows through them:
//!
//! - [`QueryParams`]: the raw one-or-many string map from the request, with
//!   the reserved vocabulary (`page`, `sort`, `limit`, `fields`, `keyword`)
//!   and the `field[gt|gte|lt|lte|in]` suffix convention.
//! - [`Filter`]: per-field clauses merged by field name plus an optional
//!   keyword clause, evaluable against JSON documents.
//! - [`QueryBuilder`]: the chained stages (filter → search → sort →
//!   field-selection → pagination) producing a [`ListPlan`] and a
//!   [`PaginationSummary`].
//!
//! # Example
//!
//! ```rust
//! use souk_service::query::{QueryBuilder, QueryParams, SearchStrategy};
//!
//! let params = QueryParams::new()
//!     .with("price[gte]", "10")
//!     .with("keyword", "shoe");
//!
//! let builder = QueryBuilder::new(params)
//!     .filter()
//!     .search(SearchStrategy::TitleAndDescription)
//!     .sort()
//!     .select_fields();
//!
//! // The caller counts matches with `current_filter()` before paginating.
//! let (plan, summary) = builder.paginate(7);
//! assert_eq!(summary.number_of_pages, 2);
//! assert_eq!(plan.limit, 5);
//! ```

mod builder;
mod filter;
mod pagination;
mod params;

pub use builder::{ListPlan, Projection, QueryBuilder, SortDirection, SortKey};
pub use filter::{
    coerce_scalar, compare_values, CompareOp, FieldClause, Filter, KeywordClause, SearchStrategy,
};
pub use pagination::{PaginationSummary, DEFAULT_LIMIT};
pub use params::{split_operator, ParamValue, QueryParams, RESERVED_KEYS};
