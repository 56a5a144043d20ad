//! Raw request query parameters
//!
//! This module provides [`QueryParams`], the request-side input to the query
//! builder. It is an ordered mapping from parameter names to one-or-many
//! string values, built from the raw query pairs of an inbound request.
//!
//! A small vocabulary of names is reserved for the builder itself
//! ([`RESERVED_KEYS`]); every other key is treated as a field filter, with an
//! optional bracket-operator suffix such as `price[gte]`.
//!
//! # Example
//!
//! ```rust
//! use souk_service::query::QueryParams;
//!
//! let params = QueryParams::from_pairs(vec![
//!     ("page".to_string(), "2".to_string()),
//!     ("price[gte]".to_string(), "10".to_string()),
//! ]);
//!
//! assert_eq!(params.get("page"), Some("2"));
//! assert!(params.contains("price[gte]"));
//! ```

use std::collections::BTreeMap;

use super::filter::CompareOp;

/// Parameter names with builder-defined meaning.
///
/// These are stripped before the remaining keys are interpreted as field
/// filters.
pub const RESERVED_KEYS: [&str; 5] = ["page", "sort", "limit", "fields", "keyword"];

/// One or many raw string values for a single parameter name.
///
/// Repeating a key in the query string accumulates values instead of
/// overwriting them, which is what `field[in]=a&field[in]=b` relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A single value
    One(String),
    /// Multiple values for the same key
    Many(Vec<String>),
}

impl ParamValue {
    /// The first (or only) value.
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            Self::One(value) => value,
            Self::Many(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// All values, in arrival order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::One(value) => vec![value.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::One(existing) => {
                *self = Self::Many(vec![std::mem::take(existing), value]);
            }
            Self::Many(values) => values.push(value),
        }
    }
}

/// Raw request query parameters.
///
/// Constructed once per list request from the inbound query pairs and handed
/// to the query builder; holds no other state and is discarded with the
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(key, value)` pairs, accumulating repeated keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use souk_service::query::QueryParams;
    ///
    /// let params = QueryParams::from_pairs(vec![
    ///     ("color[in]".to_string(), "red".to_string()),
    ///     ("color[in]".to_string(), "blue".to_string()),
    /// ]);
    /// assert_eq!(params.get_all("color[in]"), vec!["red", "blue"]);
    /// ```
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut entries: BTreeMap<String, ParamValue> = BTreeMap::new();
        for (key, value) in pairs {
            match entries.get_mut(&key) {
                Some(existing) => existing.push(value),
                None => {
                    entries.insert(key, ParamValue::One(value));
                }
            }
        }
        Self { entries }
    }

    /// Insert or append a single value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.entries.insert(key, ParamValue::One(value));
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// The first value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(ParamValue::first)
    }

    /// All values for `key`, in arrival order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .get(key)
            .map(ParamValue::values)
            .unwrap_or_default()
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` carries builder-defined meaning.
    #[must_use]
    pub fn is_reserved(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }

    /// Iterate the non-reserved entries: the field-filter portion of the map.
    pub fn filter_entries(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .filter(|(key, _)| !Self::is_reserved(key))
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Split a filter key into its field name and optional comparison operator.
///
/// `price[gte]` becomes `("price", Some(Gte))`. A key without a suffix, or
/// with a bracket segment that is not a known operator, is used verbatim as
/// an equality field.
#[must_use]
pub fn split_operator(key: &str) -> (&str, Option<CompareOp>) {
    if let Some(open) = key.find('[') {
        if let Some(stripped) = key.strip_suffix(']') {
            let suffix = &stripped[open + 1..];
            if let Some(op) = CompareOp::from_suffix(suffix) {
                return (&key[..open], Some(op));
            }
        }
    }
    (key, None)
}
