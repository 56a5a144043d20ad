//! Subcategory routes: `/api/v1/subcategories`

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::QueryParams;
use souk_service::store::Document;

use crate::models::subcategory::{CreateSubCategory, UpdateSubCategory};
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subcategories).post(create_subcategory))
        .route(
            "/{id}",
            get(get_subcategory)
                .put(update_subcategory)
                .delete(delete_subcategory),
        )
}

/// Create a subcategory; the nested category route passes the path id here.
pub(super) async fn create_in(
    state: &AppState,
    payload: CreateSubCategory,
    category_from_path: Option<String>,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    let mut doc = to_document(&payload)?;
    if !doc.contains_key("category") {
        match category_from_path {
            Some(category) => {
                doc.insert("category".to_string(), json!(category));
            }
            None => {
                return Err(ApiError::validation_failed("category: category id is required"));
            }
        }
    }
    state.subcategories().create(doc).await
}

async fn list_subcategories(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .subcategories()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_subcategory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.subcategories().fetch_one(&id).await
}

async fn create_subcategory(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubCategory>,
) -> Result<CreatedResponse<Document>, ApiError> {
    create_in(&state, payload, None).await
}

async fn update_subcategory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSubCategory>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state
        .subcategories()
        .update_one(&id, to_document(&payload)?)
        .await
}

async fn delete_subcategory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    state.subcategories().delete_one(&id).await
}
