//! User profile payloads
//!
//! Profile data only. Credentials, tokens, and roles belong to the external
//! auth layer; the profile document carries the wishlist and address book
//! the commerce routes operate on.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for users
pub const COLLECTION: &str = "users";
/// Entity kind used in error messages
pub const KIND: &str = "User";

/// Payload for creating a user profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 2, max = 64, message = "user name must be 2 to 64 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Product ids the user has wishlisted
    #[serde(default)]
    pub wishlist: Vec<String>,
    /// Saved shipping addresses
    #[serde(default)]
    pub addresses: Vec<Address>,
}

fn default_active() -> bool {
    true
}

/// Payload for updating a user profile; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 2, max = 64, message = "user name must be 2 to 64 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "invalid email address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// One saved shipping address. The `id` is assigned by the route layer so
/// individual addresses can be removed later.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "address alias is required"))]
    pub alias: String,
    #[validate(length(min = 1, message = "address details are required"))]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}
