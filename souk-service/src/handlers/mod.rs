//! Generic REST handlers for document collections
//!
//! This module eliminates duplication across CRUD endpoints: a [`Resource`]
//! descriptor generates the five standard operations for any collection,
//! with uniform not-found semantics and response envelopes.
//!
//! # Features
//!
//! - **Handler factory**: [`Resource`] — create, fetch-one, fetch-many,
//!   update-one, delete-one over any [`DocumentStore`] collection
//! - **Envelopes**: [`ItemResponse`], [`CreatedResponse`], [`ListResponse`],
//!   [`NoContent`]
//! - **Error boundary**: [`ApiError`] with automatic HTTP status mapping
//!
//! # Integration with Axum
//!
//! The envelopes and the error implement `IntoResponse`, so route handlers
//! stay one-liners:
//!
//! ```rust,ignore
//! async fn list_brands(
//!     State(state): State<AppState>,
//!     Query(pairs): Query<Vec<(String, String)>>,
//! ) -> Result<impl IntoResponse, ApiError> {
//!     state.brands().fetch_many(QueryParams::from_pairs(pairs), None).await
//! }
//! ```
//!
//! [`DocumentStore`]: crate::store::DocumentStore

mod error;
mod resource;
mod response;

pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use resource::{Resource, SaveHook};
pub use response::{CreatedResponse, ItemResponse, ListResponse, NoContent};
