//! Subcategory payloads
//!
//! Subcategories belong to a category and are also exposed as a nested
//! route under `/categories/{id}/subcategories`, where the category id
//! comes from the path instead of the body.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for subcategories
pub const COLLECTION: &str = "subcategories";
/// Entity kind used in error messages
pub const KIND: &str = "SubCategory";

/// Payload for creating a subcategory. `category` may be omitted on the
/// nested route, where the path supplies it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSubCategory {
    #[validate(length(min = 2, max = 32, message = "subcategory name must be 2 to 32 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Payload for updating a subcategory; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSubCategory {
    #[validate(length(min = 2, max = 32, message = "subcategory name must be 2 to 32 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
