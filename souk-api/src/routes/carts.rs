//! Cart routes: `/api/v1/cart`
//!
//! All cart routes act on the logged-in user's single cart.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use souk_service::handlers::{ApiError, ItemResponse, NoContent};
use souk_service::store::Document;

use crate::extract::CurrentUser;
use crate::models::cart::{AddToCart, ApplyCoupon, UpdateCartItemQuantity};
use crate::models::validate_payload;
use crate::services::cart as cart_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/apply-coupon", put(apply_coupon))
        .route(
            "/{product_id}",
            put(update_item_quantity).delete(remove_item),
        )
}

/// The cart plus its item count, mirroring the list envelope's spirit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartEnvelope {
    data: Document,
    items_count: usize,
}

async fn get_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<CartEnvelope>, ApiError> {
    let cart = cart_service::require_user_cart(&state, user.id()).await?;
    let items_count = cart
        .get("items")
        .and_then(serde_json::Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    Ok(Json(CartEnvelope {
        data: cart,
        items_count,
    }))
}

async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddToCart>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    let cart = cart_service::add_product(&state, user.id(), payload).await?;
    Ok(ItemResponse::new(cart))
}

async fn update_item_quantity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateCartItemQuantity>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    let cart =
        cart_service::update_item_quantity(&state, user.id(), &product_id, payload.quantity)
            .await?;
    Ok(ItemResponse::new(cart))
}

async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    let cart = cart_service::remove_item(&state, user.id(), &product_id).await?;
    Ok(ItemResponse::new(cart))
}

async fn clear_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<NoContent, ApiError> {
    cart_service::clear(&state, user.id()).await?;
    Ok(NoContent)
}

async fn apply_coupon(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ApplyCoupon>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    let cart = cart_service::apply_coupon(&state, user.id(), &payload.coupon).await?;
    Ok(ItemResponse::new(cart))
}
