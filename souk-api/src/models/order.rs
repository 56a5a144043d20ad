//! Order payloads
//!
//! Orders are created by the checkout service from a cart snapshot; the
//! only client-supplied data is the shipping address. Payment-provider
//! checkout flows live outside this service; orders here are cash orders
//! plus the paid/delivered transitions an operator drives.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::Address;

/// Store collection for orders
pub const COLLECTION: &str = "orders";
/// Entity kind used in error messages
pub const KIND: &str = "Order";

/// Payload for creating a cash order from a cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct CreateOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}
