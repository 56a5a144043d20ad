//! Composite document filters
//!
//! A [`Filter`] is the query-shaping output of the filter and search stages:
//! a set of per-field clauses merged by field name, plus an optional keyword
//! clause. Filters are built either from raw request parameters (by the
//! query builder) or programmatically (by nested routes and domain
//! services), and can evaluate themselves against a JSON document, which is
//! what the bundled in-memory store executes.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use souk_service::query::{CompareOp, Filter};
//!
//! let filter = Filter::new()
//!     .with_eq("category", json!("c1"))
//!     .with_op("price", CompareOp::Gte, json!(10))
//!     .with_op("price", CompareOp::Lte, json!(50));
//!
//! let doc = json!({"category": "c1", "price": 25}).as_object().unwrap().clone();
//! assert!(filter.matches(&doc));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::store::Document;

/// Comparison operators accepted as bracket suffixes on filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompareOp {
    /// Strictly greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Strictly less than
    Lt,
    /// Less than or equal
    Lte,
    /// Member of a value set
    In,
}

impl CompareOp {
    /// Parse a bracket-suffix name (`gt`, `gte`, `lt`, `lte`, `in`).
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gt => write!(f, "gt"),
            Self::Gte => write!(f, "gte"),
            Self::Lt => write!(f, "lt"),
            Self::Lte => write!(f, "lte"),
            Self::In => write!(f, "in"),
        }
    }
}

/// The clause carried by one field of a filter.
///
/// A field is either an equality constraint or a merged set of comparison
/// operators; `price[gte]=10&price[lte]=50` collapses into a single
/// `Ops` clause with two entries.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldClause {
    /// Field must equal the value (array fields match on any element)
    Eq(Value),
    /// All listed comparisons must hold
    Ops(BTreeMap<CompareOp, Value>),
}

impl FieldClause {
    fn matches(&self, actual: Option<&Value>) -> bool {
        match self {
            Self::Eq(expected) => actual.is_some_and(|value| value_eq(value, expected)),
            Self::Ops(ops) => {
                let Some(value) = actual else { return false };
                ops.iter().all(|(op, operand)| match op {
                    CompareOp::In => in_set(value, operand),
                    CompareOp::Gt => cmp_is(value, operand, Ordering::is_gt),
                    CompareOp::Gte => cmp_is(value, operand, Ordering::is_ge),
                    CompareOp::Lt => cmp_is(value, operand, Ordering::is_lt),
                    CompareOp::Lte => cmp_is(value, operand, Ordering::is_le),
                })
            }
        }
    }
}

/// Which fields a keyword search matches against.
///
/// The closed set of search shapes; callers pick one per resource instead of
/// passing a resource-name string around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Substring match on the `name` field
    #[default]
    Name,
    /// Substring match on `title` or `description` (product-like resources)
    TitleAndDescription,
}

impl SearchStrategy {
    /// The fields this strategy matches against.
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name"],
            Self::TitleAndDescription => &["title", "description"],
        }
    }
}

/// A case-insensitive substring constraint over a strategy's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClause {
    needle: String,
    strategy: SearchStrategy,
}

impl KeywordClause {
    /// Build a keyword clause; the needle is lowercased once up front.
    #[must_use]
    pub fn new(keyword: &str, strategy: SearchStrategy) -> Self {
        Self {
            needle: keyword.to_lowercase(),
            strategy,
        }
    }

    fn matches(&self, doc: &Document) -> bool {
        self.strategy.fields().iter().any(|field| {
            doc.get(*field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// A composite filter: per-field clauses merged by name plus an optional
/// keyword clause. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: BTreeMap<String, FieldClause>,
    keyword: Option<KeywordClause>,
}

impl Filter {
    /// Create an empty (match-all) filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single-field equality filter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use souk_service::query::Filter;
    ///
    /// let filter = Filter::eq("user", json!("u1"));
    /// assert!(!filter.is_empty());
    /// ```
    #[must_use]
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new().with_eq(field, value)
    }

    /// Add an equality clause, replacing any clause already on the field.
    #[must_use]
    pub fn with_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.clauses.insert(field.into(), FieldClause::Eq(value));
        self
    }

    /// Add a comparison operator to a field, merging with operators the
    /// field already carries. An equality clause on the field is replaced.
    #[must_use]
    pub fn with_op(mut self, field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        self.push_op(field.into(), op, value);
        self
    }

    pub(crate) fn push_op(&mut self, field: String, op: CompareOp, value: Value) {
        match self.clauses.get_mut(&field) {
            Some(FieldClause::Ops(ops)) => {
                ops.insert(op, value);
            }
            _ => {
                self.clauses
                    .insert(field, FieldClause::Ops(BTreeMap::from([(op, value)])));
            }
        }
    }

    pub(crate) fn set_eq(&mut self, field: String, value: Value) {
        self.clauses.insert(field, FieldClause::Eq(value));
    }

    /// Set the keyword clause.
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str, strategy: SearchStrategy) -> Self {
        self.keyword = Some(KeywordClause::new(keyword, strategy));
        self
    }

    /// AND-merge another filter into this one. Field clauses from `other`
    /// win on collision; a keyword clause in `other` replaces ours.
    #[must_use]
    pub fn merge(mut self, other: Filter) -> Self {
        self.clauses.extend(other.clauses);
        if other.keyword.is_some() {
            self.keyword = other.keyword;
        }
        self
    }

    /// Whether no constraints are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.keyword.is_none()
    }

    /// The clause on `field`, if any.
    #[must_use]
    pub fn clause(&self, field: &str) -> Option<&FieldClause> {
        self.clauses.get(field)
    }

    /// Number of field clauses (the keyword clause is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Evaluate the filter against a document. Every field clause and the
    /// keyword clause must hold.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, clause)| clause.matches(doc.get(field)))
            && self.keyword.as_ref().is_none_or(|kw| kw.matches(doc))
    }
}

/// Coerce a raw parameter string into a typed scalar.
///
/// Numeric strings become numbers and `true`/`false` become booleans so that
/// comparisons against stored numeric fields behave numerically; anything
/// else stays a string.
#[must_use]
pub fn coerce_scalar(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return Value::from(float);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

/// Ordering between two JSON scalars, numeric-aware.
///
/// Numbers compare numerically across integer/float representations;
/// strings and booleans compare within their own type. Mixed or
/// non-comparable types yield `None`. Shared with the sort stage.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn cmp_is(value: &Value, operand: &Value, check: fn(Ordering) -> bool) -> bool {
    compare_values(value, operand).is_some_and(check)
}

/// Loose equality: numbers compare numerically, and an array field matches
/// when any of its elements equals the expected value.
fn value_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(elements), _) => elements.iter().any(|element| value_eq(element, expected)),
        (Value::Number(_), Value::Number(_)) => {
            compare_values(actual, expected) == Some(Ordering::Equal)
        }
        _ => actual == expected,
    }
}

fn in_set(value: &Value, operand: &Value) -> bool {
    match operand {
        Value::Array(candidates) => candidates.iter().any(|candidate| value_eq(value, candidate)),
        single => value_eq(value, single),
    }
}
