//! Product routes: `/api/v1/products`
//!
//! Carries the nested review routes; creating a review there takes the
//! product id from the path and the reviewer from the identity header.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::{Filter, QueryParams};
use souk_service::store::Document;

use crate::extract::CurrentUser;
use crate::models::product::{CreateProduct, UpdateProduct};
use crate::models::review::CreateReview;
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

use super::reviews;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/{id}/reviews",
            get(list_product_reviews).post(create_product_review),
        )
}

async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .products()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.products().fetch_one(&id).await
}

async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.products().create(to_document(&payload)?).await
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProduct>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state
        .products()
        .update_one(&id, to_document(&payload)?)
        .await
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    state.products().delete_one(&id).await
}

/// Nested list: reviews of one product.
async fn list_product_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .reviews()
        .fetch_many(
            QueryParams::from_pairs(pairs),
            Some(Filter::eq("product", json!(id))),
        )
        .await
}

/// Nested create: product from the path, reviewer from the identity header.
async fn create_product_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: CurrentUser,
    Json(payload): Json<CreateReview>,
) -> Result<CreatedResponse<Document>, ApiError> {
    reviews::create_for_product(&state, user.id(), &id, payload).await
}
