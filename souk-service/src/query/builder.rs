//! The list query builder
//!
//! [`QueryBuilder`] turns a raw [`QueryParams`] map plus an optional
//! pre-applied base filter into an executable [`ListPlan`] and a
//! [`PaginationSummary`], through chained stages applied in a fixed order:
//! filter → search → sort → field-selection → pagination.
//!
//! The stages are purely query-shaping: none of them fails, and absent
//! parameters fall back to defaults (match-all filter, newest-first sort,
//! all fields except the internal revision field, page 1 of
//! [`DEFAULT_LIMIT`]).
//!
//! The pagination stage takes the total count of matching documents as an
//! argument; the caller computes it over the filtered, un-paginated set
//! before paginating, so the summary is correct for any requested page.
//!
//! # Example
//!
//! ```rust
//! use souk_service::query::{QueryBuilder, QueryParams, SearchStrategy};
//!
//! let params = QueryParams::new()
//!     .with("page", "3")
//!     .with("limit", "5")
//!     .with("sort", "-price,title");
//!
//! let builder = QueryBuilder::new(params)
//!     .filter()
//!     .search(SearchStrategy::TitleAndDescription)
//!     .sort()
//!     .select_fields();
//!
//! let (plan, summary) = builder.paginate(12);
//! assert_eq!(plan.skip, 10);
//! assert_eq!(summary.prev, Some(2));
//! assert_eq!(summary.next, None);
//! ```

use std::fmt;

use serde_json::Value;

use crate::store::{Document, CREATED_AT_FIELD, REVISION_FIELD};

use super::filter::{coerce_scalar, CompareOp, Filter, SearchStrategy};
use super::pagination::{PaginationSummary, DEFAULT_LIMIT};
use super::params::{split_operator, ParamValue, QueryParams};

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// A-Z, 0-9, oldest first
    #[default]
    Ascending,
    /// Z-A, 9-0, newest first
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// One key of a multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field to sort on
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending sort on `field`.
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `field`.
    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Parse one element of a `sort` parameter; a `-` prefix means
    /// descending.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }
        Some(match spec.strip_prefix('-') {
            Some(field) => Self::desc(field),
            None => Self::asc(spec),
        })
    }
}

/// Which fields of each matching document the response carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Projection {
    /// Every field except the internal revision field
    #[default]
    AllButRevision,
    /// Exactly the listed fields
    Include(Vec<String>),
}

impl Projection {
    /// Apply the projection to a document in place.
    pub fn apply(&self, doc: &mut Document) {
        match self {
            Self::AllButRevision => {
                doc.remove(REVISION_FIELD);
            }
            Self::Include(fields) => {
                doc.retain(|key, _| fields.iter().any(|field| field == key));
            }
        }
    }
}

/// A fully-specified, executable list query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPlan {
    /// Composite filter over the collection
    pub filter: Filter,
    /// Multi-key sort, applied in order
    pub sort: Vec<SortKey>,
    /// Field selection
    pub projection: Projection,
    /// Documents to skip
    pub skip: u64,
    /// Maximum documents to return
    pub limit: u64,
}

impl ListPlan {
    /// A plan over the whole matching set: default sort, default
    /// projection, no pagination. Used for eager-loads and domain queries.
    #[must_use]
    pub fn unpaginated(filter: Filter) -> Self {
        Self {
            filter,
            sort: vec![SortKey::desc(CREATED_AT_FIELD)],
            projection: Projection::AllButRevision,
            skip: 0,
            limit: u64::MAX,
        }
    }
}

/// Incrementally narrows a pending list query from raw request parameters.
///
/// Holds the parameter map and the query state accumulated by the stages;
/// nothing else. Constructed per request and consumed by
/// [`paginate`](Self::paginate).
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: QueryParams,
    filter: Filter,
    sort: Vec<SortKey>,
    projection: Projection,
}

impl QueryBuilder {
    /// Start a builder over the raw parameter map.
    #[must_use]
    pub fn new(params: QueryParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Seed the builder with an externally pre-computed filter, e.g. a
    /// nested route scoping reviews to one product. Parameter-derived
    /// clauses are merged on top by the filter stage.
    #[must_use]
    pub fn with_base_filter(mut self, base: Filter) -> Self {
        self.filter = base;
        self
    }

    /// Filter stage: interpret every non-reserved parameter as a field
    /// clause, parsing bracket-operator suffixes and merging clauses by
    /// field name. Absent parameters leave the filter as-is (match-all).
    #[must_use]
    pub fn filter(mut self) -> Self {
        let entries: Vec<(String, ParamValue)> = self
            .params
            .filter_entries()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        for (key, value) in entries {
            let (field, op) = split_operator(&key);
            match op {
                Some(CompareOp::In) => {
                    let candidates = in_candidates(&value);
                    self.filter
                        .push_op(field.to_string(), CompareOp::In, Value::Array(candidates));
                }
                Some(op) => {
                    self.filter
                        .push_op(field.to_string(), op, coerce_scalar(value.first()));
                }
                None => match value {
                    ParamValue::One(raw) => {
                        self.filter.set_eq(field.to_string(), coerce_scalar(&raw));
                    }
                    // A repeated plain key reads as a value set.
                    ParamValue::Many(_) => {
                        let candidates = in_candidates(&value);
                        self.filter.push_op(
                            field.to_string(),
                            CompareOp::In,
                            Value::Array(candidates),
                        );
                    }
                },
            }
        }
        self
    }

    /// Search stage: add a case-insensitive keyword clause over the
    /// strategy's fields if `keyword` is present; otherwise a no-op.
    #[must_use]
    pub fn search(mut self, strategy: SearchStrategy) -> Self {
        if let Some(keyword) = self.params.get("keyword") {
            if !keyword.is_empty() {
                self.filter = self.filter.with_keyword(keyword, strategy);
            }
        }
        self
    }

    /// Sort stage: comma-separated field list with `-` for descending;
    /// absent → newest first.
    #[must_use]
    pub fn sort(mut self) -> Self {
        self.sort = match self.params.get("sort") {
            Some(spec) => spec.split(',').filter_map(SortKey::parse).collect(),
            None => Vec::new(),
        };
        if self.sort.is_empty() {
            self.sort = vec![SortKey::desc(CREATED_AT_FIELD)];
        }
        self
    }

    /// Field-selection stage: comma-separated include list; absent → all
    /// fields except the internal revision field.
    #[must_use]
    pub fn select_fields(mut self) -> Self {
        if let Some(spec) = self.params.get("fields") {
            let fields: Vec<String> = spec
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect();
            if !fields.is_empty() {
                self.projection = Projection::Include(fields);
            }
        }
        self
    }

    /// The filter accumulated so far. Callers count the matching set with
    /// this before running the pagination stage.
    #[must_use]
    pub fn current_filter(&self) -> &Filter {
        &self.filter
    }

    /// Pagination stage: compute the effective page/limit (non-numeric or
    /// zero values fall back to 1 and [`DEFAULT_LIMIT`]), apply skip/limit,
    /// and produce the summary from `total`.
    #[must_use]
    pub fn paginate(self, total: u64) -> (ListPlan, PaginationSummary) {
        let page = parse_positive(self.params.get("page")).unwrap_or(1);
        let limit = parse_positive(self.params.get("limit")).unwrap_or(DEFAULT_LIMIT);
        let summary = PaginationSummary::new(page, limit, total);
        let plan = ListPlan {
            filter: self.filter,
            sort: self.sort,
            projection: self.projection,
            skip: summary.skip(),
            limit,
        };
        (plan, summary)
    }
}

/// `field[in]` candidates: repeated keys contribute one candidate each, a
/// single value splits on commas.
fn in_candidates(value: &ParamValue) -> Vec<Value> {
    let raw: Vec<&str> = match value {
        ParamValue::One(single) => single.split(',').collect(),
        ParamValue::Many(_) => value.values(),
    };
    raw.into_iter()
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map(coerce_scalar)
        .collect()
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|&value| value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter::FieldClause;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_filter_stage_plain_keys_become_equality() {
        let builder = QueryBuilder::new(params(&[
            ("category", "c1"),
            ("page", "2"),
            ("sort", "-price"),
            ("limit", "10"),
            ("fields", "title"),
            ("keyword", "x"),
        ]))
        .filter();

        let filter = builder.current_filter();
        assert_eq!(filter.len(), 1);
        assert_eq!(
            filter.clause("category"),
            Some(&FieldClause::Eq(json!("c1")))
        );
    }

    #[test]
    fn test_filter_stage_merges_range_operators() {
        let builder =
            QueryBuilder::new(params(&[("price[gte]", "10"), ("price[lte]", "50")])).filter();

        match builder.current_filter().clause("price") {
            Some(FieldClause::Ops(ops)) => {
                assert_eq!(ops.get(&CompareOp::Gte), Some(&json!(10)));
                assert_eq!(ops.get(&CompareOp::Lte), Some(&json!(50)));
            }
            other => panic!("expected merged clause, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_stage_in_splits_commas() {
        let builder = QueryBuilder::new(params(&[("brand[in]", "acme,apex")])).filter();
        assert_eq!(
            builder.current_filter().clause("brand"),
            Some(&FieldClause::Ops(
                [(CompareOp::In, json!(["acme", "apex"]))].into()
            ))
        );
    }

    #[test]
    fn test_filter_stage_repeated_plain_key_reads_as_set() {
        let builder = QueryBuilder::new(params(&[("color", "red"), ("color", "blue")])).filter();
        assert_eq!(
            builder.current_filter().clause("color"),
            Some(&FieldClause::Ops(
                [(CompareOp::In, json!(["red", "blue"]))].into()
            ))
        );
    }

    #[test]
    fn test_base_filter_survives_filter_stage() {
        let builder = QueryBuilder::new(params(&[("status", "open")]))
            .with_base_filter(Filter::eq("user", json!("u1")))
            .filter();
        let filter = builder.current_filter();
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.clause("user"), Some(&FieldClause::Eq(json!("u1"))));
    }

    #[test]
    fn test_search_stage_no_keyword_is_noop() {
        let builder = QueryBuilder::new(params(&[]))
            .filter()
            .search(SearchStrategy::Name);
        assert!(builder.current_filter().is_empty());
    }

    #[test]
    fn test_search_stage_adds_keyword_clause() {
        let builder = QueryBuilder::new(params(&[("keyword", "shoe")]))
            .filter()
            .search(SearchStrategy::TitleAndDescription);
        let doc = json!({"title": "Running Shoe"}).as_object().unwrap().clone();
        assert!(builder.current_filter().matches(&doc));
    }

    #[test]
    fn test_sort_stage_parses_multi_key() {
        let builder = QueryBuilder::new(params(&[("sort", "-price,title")])).sort();
        let (plan, _) = builder.paginate(0);
        assert_eq!(
            plan.sort,
            vec![SortKey::desc("price"), SortKey::asc("title")]
        );
    }

    #[test]
    fn test_sort_stage_default_is_newest_first() {
        let (plan, _) = QueryBuilder::new(params(&[])).sort().paginate(0);
        assert_eq!(plan.sort, vec![SortKey::desc(CREATED_AT_FIELD)]);
    }

    #[test]
    fn test_select_fields_stage() {
        let (plan, _) = QueryBuilder::new(params(&[("fields", "title, price")]))
            .select_fields()
            .paginate(0);
        assert_eq!(
            plan.projection,
            Projection::Include(vec!["title".to_string(), "price".to_string()])
        );
    }

    #[test]
    fn test_select_fields_default_excludes_revision() {
        let (plan, _) = QueryBuilder::new(params(&[])).select_fields().paginate(0);
        assert_eq!(plan.projection, Projection::AllButRevision);

        let mut doc = json!({"title": "x", "revision": 3})
            .as_object()
            .unwrap()
            .clone();
        plan.projection.apply(&mut doc);
        assert!(!doc.contains_key("revision"));
        assert!(doc.contains_key("title"));
    }

    #[test]
    fn test_projection_include_keeps_exactly_listed_fields() {
        let projection = Projection::Include(vec!["title".to_string()]);
        let mut doc = json!({"id": "1", "title": "x", "price": 2})
            .as_object()
            .unwrap()
            .clone();
        projection.apply(&mut doc);
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("title"));
    }

    #[test]
    fn test_paginate_defaults() {
        let (plan, summary) = QueryBuilder::new(params(&[])).paginate(12);
        assert_eq!(plan.skip, 0);
        assert_eq!(plan.limit, DEFAULT_LIMIT);
        assert_eq!(summary.page, 1);
        assert_eq!(summary.number_of_pages, 3);
        assert_eq!(summary.next, Some(2));
    }

    #[test]
    fn test_paginate_explicit_page() {
        let (plan, summary) =
            QueryBuilder::new(params(&[("page", "3"), ("limit", "5")])).paginate(12);
        assert_eq!(plan.skip, 10);
        assert_eq!(summary.prev, Some(2));
        assert_eq!(summary.next, None);
    }

    #[test]
    fn test_paginate_non_numeric_falls_back() {
        let (plan, summary) =
            QueryBuilder::new(params(&[("page", "abc"), ("limit", "-2")])).paginate(12);
        assert_eq!(summary.page, 1);
        assert_eq!(summary.limit, DEFAULT_LIMIT);
        assert_eq!(plan.skip, 0);
    }

    #[test]
    fn test_paginate_zero_falls_back() {
        let (_, summary) = QueryBuilder::new(params(&[("page", "0"), ("limit", "0")])).paginate(12);
        assert_eq!(summary.page, 1);
        assert_eq!(summary.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_unpaginated_plan() {
        let plan = ListPlan::unpaginated(Filter::eq("product", json!("p1")));
        assert_eq!(plan.skip, 0);
        assert_eq!(plan.limit, u64::MAX);
        assert_eq!(plan.sort, vec![SortKey::desc(CREATED_AT_FIELD)]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("-price"), Some(SortKey::desc("price")));
        assert_eq!(SortKey::parse("title"), Some(SortKey::asc("title")));
        assert_eq!(SortKey::parse("  "), None);
    }
}
