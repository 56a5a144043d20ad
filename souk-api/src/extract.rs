//! Request extractors
//!
//! [`CurrentUser`] is the seam to the external authentication layer: the
//! auth gateway validates credentials upstream and forwards the subject in
//! the `x-user-id` header. Nothing here parses tokens or checks roles.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use souk_service::handlers::ApiError;

/// Header the external auth layer forwards the authenticated subject in.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user's id, taken from [`USER_ID_HEADER`].
///
/// Rejects with 401 when the header is missing or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    /// The user id as a string slice.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
            .ok_or_else(|| ApiError::unauthorized("Missing x-user-id header"))
    }
}
