//! Response envelopes for REST handlers
//!
//! The uniform response shapes the web layer relies on: `{data}` for single
//! entities (200, or 201 on create), `{data, resultsCount, pagination}` for
//! lists, and an empty 204 for deletes. All implement `IntoResponse` so
//! axum handlers can return them directly.
//!
//! # Example
//!
//! ```rust
//! use souk_service::handlers::{ItemResponse, ListResponse};
//! use souk_service::query::PaginationSummary;
//!
//! let item = ItemResponse::new("brand");
//! assert_eq!(item.data, "brand");
//!
//! let list = ListResponse::new(vec![1, 2, 3], PaginationSummary::new(1, 5, 3));
//! assert_eq!(list.results_count, 3);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::query::PaginationSummary;

/// Single entity response wrapper, returned with 200.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResponse<T> {
    /// The response data
    pub data: T,
}

impl<T> ItemResponse<T> {
    /// Wrap an entity.
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Map the inner data to a new type.
    pub fn map<U, F>(self, f: F) -> ItemResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ItemResponse { data: f(self.data) }
    }
}

impl<T: Serialize> IntoResponse for ItemResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Single entity response wrapper for freshly persisted entities, returned
/// with 201.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedResponse<T> {
    /// The created entity
    pub data: T,
}

impl<T> CreatedResponse<T> {
    /// Wrap a created entity.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for CreatedResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Empty 204 response for successful deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// List response: the page of entities, the count of entities in THIS page,
/// and the pagination summary over the whole matching set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// The page of entities
    pub data: Vec<T>,
    /// Number of entities in this page (not the total)
    pub results_count: usize,
    /// Summary over the whole matching set
    pub pagination: PaginationSummary,
}

impl<T> ListResponse<T> {
    /// Build a list response; `results_count` is derived from the page.
    pub fn new(data: Vec<T>, pagination: PaginationSummary) -> Self {
        Self {
            results_count: data.len(),
            data,
            pagination,
        }
    }

    /// Number of entities in the current page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the current page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Map each entity in the page to a new type.
    pub fn map<U, F>(self, f: F) -> ListResponse<U>
    where
        F: FnMut(T) -> U,
    {
        ListResponse {
            data: self.data.into_iter().map(f).collect(),
            results_count: self.results_count,
            pagination: self.pagination,
        }
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_response() {
        let response = ItemResponse::new(42);
        assert_eq!(response.data, 42);
        let mapped = response.map(|n| n.to_string());
        assert_eq!(mapped.data, "42");
    }

    #[test]
    fn test_created_response_wire_shape() {
        let response = CreatedResponse::new(json!({"name": "Acme"}));
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire, json!({"data": {"name": "Acme"}}));
    }

    #[test]
    fn test_list_response_counts_current_page() {
        let response = ListResponse::new(vec![1, 2], PaginationSummary::new(1, 5, 12));
        assert_eq!(response.results_count, 2);
        assert_eq!(response.len(), 2);
        assert!(!response.is_empty());
        assert_eq!(response.pagination.number_of_pages, 3);
    }

    #[test]
    fn test_list_response_empty() {
        let response: ListResponse<String> = ListResponse::new(vec![], PaginationSummary::new(1, 5, 0));
        assert!(response.is_empty());
        assert_eq!(response.results_count, 0);
        assert_eq!(response.pagination.number_of_pages, 0);
    }

    #[test]
    fn test_list_response_wire_names() {
        let response = ListResponse::new(vec![1], PaginationSummary::new(1, 5, 1));
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["resultsCount"], 1);
        assert_eq!(wire["pagination"]["numberOfPages"], 1);
        assert_eq!(wire["data"], json!([1]));
    }

    #[test]
    fn test_list_response_map_preserves_pagination() {
        let response = ListResponse::new(vec![1, 2], PaginationSummary::new(2, 5, 12));
        let mapped = response.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20]);
        assert_eq!(mapped.pagination.page, 2);
    }
}
