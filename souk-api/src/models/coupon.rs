//! Coupon payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for coupons
pub const COLLECTION: &str = "coupons";
/// Entity kind used in error messages
pub const KIND: &str = "Coupon";

/// How a coupon's discount applies to a cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount` is a percentage of the cart total
    #[default]
    Percentage,
    /// `discount` is subtracted from the cart total
    Fixed,
}

/// Payload for creating a coupon.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCoupon {
    #[validate(length(min = 1, message = "coupon name is required"))]
    pub name: String,
    /// Expiry instant, RFC 3339
    pub expire: chrono::DateTime<chrono::Utc>,
    #[validate(range(min = 0.0, message = "coupon discount must not be negative"))]
    pub discount: f64,
    #[serde(default)]
    pub discount_type: DiscountType,
}

/// Payload for updating a coupon; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCoupon {
    #[validate(length(min = 1, message = "coupon name is required"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire: Option<chrono::DateTime<chrono::Utc>>,
    #[validate(range(min = 0.0, message = "coupon discount must not be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
}
