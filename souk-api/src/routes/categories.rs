//! Category routes: `/api/v1/categories`
//!
//! Also exposes the nested subcategory routes, where the category id from
//! the path scopes the list and fills the create payload.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::{Filter, QueryParams};
use souk_service::store::Document;

use crate::models::category::{CreateCategory, UpdateCategory};
use crate::models::subcategory::CreateSubCategory;
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

use super::subcategories;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route(
            "/{id}/subcategories",
            get(list_category_subcategories).post(create_category_subcategory),
        )
}

async fn list_categories(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .categories()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.categories().fetch_one(&id).await
}

async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategory>,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.categories().create(to_document(&payload)?).await
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategory>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state
        .categories()
        .update_one(&id, to_document(&payload)?)
        .await
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    state.categories().delete_one(&id).await
}

/// Nested list: subcategories of one category.
async fn list_category_subcategories(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .subcategories()
        .fetch_many(
            QueryParams::from_pairs(pairs),
            Some(Filter::eq("category", json!(id))),
        )
        .await
}

/// Nested create: the path supplies the category id when the body omits it.
async fn create_category_subcategory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateSubCategory>,
) -> Result<CreatedResponse<Document>, ApiError> {
    subcategories::create_in(&state, payload, Some(id)).await
}
