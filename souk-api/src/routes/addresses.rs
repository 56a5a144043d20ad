//! Address book routes: `/api/v1/addresses`
//!
//! Addresses are subdocuments on the user's profile; each gets an id on
//! insert so it can be removed individually.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use souk_service::handlers::{ApiError, ItemResponse};
use souk_service::store::{Document, DocumentStore};
use uuid::Uuid;

use crate::extract::CurrentUser;
use crate::models::user::{Address, COLLECTION as USERS};
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

use super::wishlist::load_user;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_addresses).post(add_address))
        .route("/{address_id}", axum::routing::delete(remove_address))
}

/// The address book with the count alongside.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressList {
    data: Vec<Value>,
    results_count: usize,
}

fn addresses_mut(user: &mut Document) -> &mut Vec<Value> {
    user.entry("addresses")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .expect("addresses is an array")
}

fn addresses_of(user: &Document) -> Vec<Value> {
    user.get("addresses")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

async fn add_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(mut payload): Json<Address>,
) -> Result<ItemResponse<Vec<Value>>, ApiError> {
    validate_payload(&payload)?;
    payload.id = Some(Uuid::new_v4().to_string());

    let mut profile = load_user(&state, user.id()).await?;
    addresses_mut(&mut profile).push(Value::Object(to_document(&payload)?));

    let saved = state.store().save(USERS, profile).await?;
    Ok(ItemResponse::new(addresses_of(&saved)))
}

async fn remove_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(address_id): Path<String>,
) -> Result<ItemResponse<Vec<Value>>, ApiError> {
    let mut profile = load_user(&state, user.id()).await?;

    addresses_mut(&mut profile)
        .retain(|address| address.get("id").and_then(Value::as_str) != Some(address_id.as_str()));

    let saved = state.store().save(USERS, profile).await?;
    Ok(ItemResponse::new(addresses_of(&saved)))
}

async fn get_addresses(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<AddressList>, ApiError> {
    let profile = load_user(&state, user.id()).await?;
    let data = addresses_of(&profile);
    Ok(Json(AddressList {
        results_count: data.len(),
        data,
    }))
}
