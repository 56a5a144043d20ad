//! Domain services
//!
//! The operations that do not fit the generic five-handler shape: cart
//! mutation and coupon application, checkout, and review-aggregate
//! maintenance. Each talks to the store directly, the way single-entity
//! handlers do.

pub mod cart;
pub mod checkout;
pub mod ratings;
