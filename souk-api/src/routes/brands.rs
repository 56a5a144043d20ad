//! Brand routes: `/api/v1/brands`

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::QueryParams;
use souk_service::store::Document;

use crate::models::brand::{CreateBrand, UpdateBrand};
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_brands).post(create_brand))
        .route("/{id}", get(get_brand).put(update_brand).delete(delete_brand))
}

async fn list_brands(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .brands()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.brands().fetch_one(&id).await
}

async fn create_brand(
    State(state): State<AppState>,
    Json(payload): Json<CreateBrand>,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.brands().create(to_document(&payload)?).await
}

async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBrand>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.brands().update_one(&id, to_document(&payload)?).await
}

async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    state.brands().delete_one(&id).await
}
