//! Review payloads
//!
//! Reviews are nested under products; the product id and the reviewer are
//! filled in by the route layer, not trusted from the body.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for reviews
pub const COLLECTION: &str = "reviews";
/// Entity kind used in error messages
pub const KIND: &str = "Review";

/// Payload for creating a review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(range(min = 1.0, max = 5.0, message = "rating must be between 1 and 5"))]
    pub ratings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "review comment must be at least 10 characters"))]
    pub comment: String,
    /// Product under review; the nested route supplies it from the path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

/// Payload for updating a review; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReview {
    #[validate(range(min = 1.0, max = 5.0, message = "rating must be between 1 and 5"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "review comment must be at least 10 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
