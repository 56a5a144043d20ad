//! Cart payloads
//!
//! Carts are documents managed by the cart service; these are the request
//! payloads of the cart routes. One cart per user; items snapshot the
//! product price at add time.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for carts
pub const COLLECTION: &str = "carts";
/// Entity kind used in error messages
pub const KIND: &str = "Cart";

/// Payload for adding a product to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddToCart {
    #[validate(length(min = 1, message = "product id is required"))]
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for setting a cart item's quantity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemQuantity {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

/// Payload for applying a coupon code to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyCoupon {
    #[validate(length(min = 1, message = "coupon code is required"))]
    pub coupon: String,
}
