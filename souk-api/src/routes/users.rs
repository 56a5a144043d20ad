//! User profile routes: `/api/v1/users`
//!
//! Admin-facing profile CRUD. The logged-in user's own wishlist and
//! addresses live under their dedicated routes.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use souk_service::handlers::{ApiError, CreatedResponse, ItemResponse, ListResponse, NoContent};
use souk_service::query::QueryParams;
use souk_service::store::Document;

use crate::models::user::{CreateUser, UpdateUser};
use crate::models::{to_document, validate_payload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ListResponse<Document>, ApiError> {
    state
        .users()
        .fetch_many(QueryParams::from_pairs(pairs), None)
        .await
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ItemResponse<Document>, ApiError> {
    state.users().fetch_one(&id).await
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<CreatedResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.users().create(to_document(&payload)?).await
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<ItemResponse<Document>, ApiError> {
    validate_payload(&payload)?;
    state.users().update_one(&id, to_document(&payload)?).await
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<NoContent, ApiError> {
    state.users().delete_one(&id).await
}
