//! Review routes: `/api/v1/reviews`
//!
//! Every review mutation ends with a recalculation of the product's rating
//! aggregate.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::QueryParams;
use souk_service::store::{Document, DocumentStore};

use crate::extract::CurrentUser;
use crate::models::product::{COLLECTION as PRODUCTS, KIND as PRODUCT_KIND};
use crate::models::review::{CreateReview, UpdateReview, COLLECTION as REVIEWS, KIND as REVIEW_KIND};
use crate::models::{to_document, validate_payload};
use crate::services::ratings;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// Create a review against a known product and refresh its aggregate.
pub(super) async fn create_for_product(
    state: &AppState,
    user_id: &str,
    product_id: &str,
    payload: CreateReview,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state
        .store()
        .find_by_id(PRODUCTS, product_id)
        .await?
        .ok_or_else(|| ApiError::not_found(PRODUCT_KIND, product_id))?;

    let mut doc = to_document(&payload)?;
    doc.insert("product".to_string(), json!(product_id));
    doc.insert("user".to_string(), json!(user_id));

    let created = state.reviews().create(doc).await?;
    ratings::recalculate_product_ratings(state, product_id).await?;
    Ok(created)
}

async fn list_reviews(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .reviews()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.reviews().fetch_one(&id).await
}

/// Flat create; the body must name the product.
async fn create_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateReview>,
) -> Result<CreatedResponse<Document>, ApiError> {
    let Some(product_id) = payload.product.clone() else {
        return Err(ApiError::validation_failed("product: product id is required"));
    };
    create_for_product(&state, user.id(), &product_id, payload).await
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReview>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    let updated = state.reviews().update_one(&id, to_document(&payload)?).await?;
    if let Some(product_id) = updated.data.get("product").and_then(Value::as_str) {
        ratings::recalculate_product_ratings(&state, product_id).await?;
    }
    Ok(updated)
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    let review = state
        .store()
        .find_by_id(REVIEWS, &id)
        .await?
        .ok_or_else(|| ApiError::not_found(REVIEW_KIND, id.clone()))?;

    let response = state.reviews().delete_one(&id).await?;
    if let Some(product_id) = review.get("product").and_then(Value::as_str) {
        ratings::recalculate_product_ratings(&state, product_id).await?;
    }
    Ok(response)
}
