//! Coupon routes: `/api/v1/coupons`

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::QueryParams;
use souk_service::store::Document;

use crate::models::coupon::{CreateCoupon, UpdateCoupon};
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coupons).post(create_coupon))
        .route(
            "/{id}",
            get(get_coupon).put(update_coupon).delete(delete_coupon),
        )
}

async fn list_coupons(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .coupons()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_coupon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.coupons().fetch_one(&id).await
}

async fn create_coupon(
    State(state): State<AppState>,
    Json(payload): Json<CreateCoupon>,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.coupons().create(to_document(&payload)?).await
}

async fn update_coupon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCoupon>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.coupons().update_one(&id, to_document(&payload)?).await
}

async fn delete_coupon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    state.coupons().delete_one(&id).await
}
