//! Order routes: `/api/v1/orders`
//!
//! Listing is always scoped to the logged-in user through the pre-set base
//! filter; creation turns the named cart into a cash order.

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse};
use souk_service::query::{Filter, QueryParams};
use souk_service::store::Document;

use crate::extract::CurrentUser;
use crate::models::order::CreateOrder;
use crate::services::checkout;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/{id}", get(get_order).post(create_cash_order))
        .route("/{id}/pay", put(pay_order))
        .route("/{id}/delivered", put(deliver_order))
}

/// List the logged-in user's orders.
async fn list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .orders()
        .fetch_many(
            QueryParams::from_pairs(pairs),
            Some(Filter::eq("user", json!(user.id()))),
        )
        .await
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.orders().fetch_one(&id).await
}

/// Create a cash order from the cart with the given id.
async fn create_cash_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateOrder>,
) -> Result<CreatedResponse<Document>, ApiError> {
    let order = checkout::create_cash_order(&state, user.id(), &id, payload).await?;
    Ok(CreatedResponse::new(order))
}

async fn pay_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    let order = checkout::mark_paid(&state, &id).await?;
    Ok(ItemResponse::new(order))
}

async fn deliver_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    let order = checkout::mark_delivered(&state, &id).await?;
    Ok(ItemResponse::new(order))
}
