//! Category payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for categories
pub const COLLECTION: &str = "categories";
/// Entity kind used in error messages
pub const KIND: &str = "Category";

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 3, max = 32, message = "category name must be 3 to 32 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Payload for updating a category; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 3, max = 32, message = "category name must be 3 to 32 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
