//! Wishlist routes: `/api/v1/wishlist`
//!
//! The wishlist is an id set on the user's profile document; listing it
//! inflates the ids into product documents.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use souk_service::handlers::{ApiError, ItemResponse};
use souk_service::store::{Document, DocumentStore};
use validator::Validate;

use crate::extract::CurrentUser;
use crate::models::product::COLLECTION as PRODUCTS;
use crate::models::user::{COLLECTION as USERS, KIND as USER_KIND};
use crate::models::validate_payload;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wishlist).post(add_to_wishlist))
        .route("/{product_id}", axum::routing::delete(remove_from_wishlist))
}

#[derive(Debug, Deserialize, Validate)]
struct AddToWishlist {
    #[validate(length(min = 1, message = "product id is required"))]
    product_id: String,
}

pub(super) async fn load_user(state: &AppState, user_id: &str) -> Result<Document, ApiError> {
    state
        .store()
        .find_by_id(USERS, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_KIND, user_id))
}

fn wishlist_mut(user: &mut Document) -> &mut Vec<Value> {
    user.entry("wishlist")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .expect("wishlist is an array")
}

/// Add a product id to the set; re-adding is a no-op.
async fn add_to_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddToWishlist>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    let mut profile = load_user(&state, user.id()).await?;

    let wishlist = wishlist_mut(&mut profile);
    let entry = Value::String(payload.product_id);
    if !wishlist.contains(&entry) {
        wishlist.push(entry);
    }

    let saved = state.store().save(USERS, profile).await?;
    Ok(ItemResponse::new(saved))
}

async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    let mut profile = load_user(&state, user.id()).await?;

    let wishlist = wishlist_mut(&mut profile);
    wishlist.retain(|entry| entry.as_str() != Some(product_id.as_str()));

    let saved = state.store().save(USERS, profile).await?;
    Ok(ItemResponse::new(saved))
}

/// The profile with the wishlist inflated into product documents. Ids whose
/// product has since been deleted are dropped from the view.
async fn get_wishlist(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ItemResponse<Document>, ApiError> {
    let mut profile = load_user(&state, user.id()).await?;

    let ids: Vec<String> = profile
        .get("wishlist")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut products = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(product) = state.store().find_by_id(PRODUCTS, &id).await? {
            products.push(Value::Object(product));
        }
    }
    profile.insert("wishlist".to_string(), Value::Array(products));
    Ok(ItemResponse::new(profile))
}
