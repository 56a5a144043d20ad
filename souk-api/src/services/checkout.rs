//! Checkout service
//!
//! Creates cash orders from a cart snapshot and drives the paid/delivered
//! transitions. Creation is not atomic across collections: the order is
//! persisted, then stock is adjusted per item, then the cart is dropped.
//! Payment-provider sessions are an external concern.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use souk_service::handlers::ApiError;
use souk_service::store::{Document, DocumentStore};

use crate::models::cart::{COLLECTION as CARTS, KIND as CART_KIND};
use crate::models::order::{CreateOrder, COLLECTION as ORDERS};
use crate::models::product::COLLECTION as PRODUCTS;
use crate::state::AppState;

const TAX_PRICE: f64 = 0.0;
const SHIPPING_PRICE: f64 = 0.0;

/// Create a cash order from the cart with `cart_id`.
///
/// The order price is the cart's discounted total when a coupon was
/// applied, the plain total otherwise, plus tax and shipping. Each ordered
/// item decrements its product's stock and increments its sold counter;
/// the cart is deleted afterwards.
pub async fn create_cash_order(
    state: &AppState,
    user_id: &str,
    cart_id: &str,
    payload: CreateOrder,
) -> Result<Document, ApiError> {
    let cart = state
        .store()
        .find_by_id(CARTS, cart_id)
        .await?
        .ok_or_else(|| ApiError::not_found(CART_KIND, cart_id))?;

    let cart_price = cart
        .get("total_price_after_discount")
        .and_then(Value::as_f64)
        .or_else(|| cart.get("total_price").and_then(Value::as_f64))
        .unwrap_or(0.0);
    let total = cart_price + TAX_PRICE + SHIPPING_PRICE;

    let items = cart.get("items").cloned().unwrap_or_else(|| json!([]));
    let order = json!({
        "user": user_id,
        "items": items,
        "tax_price": TAX_PRICE,
        "shipping_price": SHIPPING_PRICE,
        "total_price": total,
        "paid": false,
        "delivered": false,
        "payment_method": "cash",
        "shipping_address": payload.shipping_address,
    });
    let order = state
        .store()
        .create(ORDERS, order.as_object().expect("order document").clone())
        .await?;

    adjust_stock(state, order.get("items").and_then(Value::as_array)).await?;

    state.store().delete_by_id(CARTS, cart_id).await?;

    tracing::info!(
        user = %user_id,
        cart = %cart_id,
        total = total,
        "cash order created"
    );
    Ok(order)
}

/// Decrement stock and increment the sold counter for each ordered item.
/// Items whose product has since disappeared are skipped.
async fn adjust_stock(state: &AppState, items: Option<&Vec<Value>>) -> Result<(), ApiError> {
    let Some(items) = items else { return Ok(()) };
    for item in items {
        let Some(product_id) = item.get("product").and_then(Value::as_str) else {
            continue;
        };
        let quantity = item.get("quantity").and_then(Value::as_i64).unwrap_or(0);
        let Some(product) = state.store().find_by_id(PRODUCTS, product_id).await? else {
            continue;
        };
        let stock = product.get("quantity").and_then(Value::as_i64).unwrap_or(0);
        let sold = product.get("sold").and_then(Value::as_i64).unwrap_or(0);
        let patch = json!({
            "quantity": stock - quantity,
            "sold": sold + quantity,
        });
        state
            .store()
            .find_by_id_and_update(
                PRODUCTS,
                product_id,
                patch.as_object().expect("patch document").clone(),
            )
            .await?;
    }
    Ok(())
}

/// Mark an order paid, stamping `paid_at`.
pub async fn mark_paid(state: &AppState, order_id: &str) -> Result<Document, ApiError> {
    transition(state, order_id, "paid", "paid_at").await
}

/// Mark an order delivered, stamping `delivered_at`.
pub async fn mark_delivered(state: &AppState, order_id: &str) -> Result<Document, ApiError> {
    transition(state, order_id, "delivered", "delivered_at").await
}

async fn transition(
    state: &AppState,
    order_id: &str,
    flag: &str,
    stamp: &str,
) -> Result<Document, ApiError> {
    let patch = json!({
        flag: true,
        stamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    });
    let updated = state
        .orders()
        .update_one(order_id, patch.as_object().expect("patch document").clone())
        .await?;
    Ok(updated.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cart::AddToCart;
    use crate::services::cart as cart_service;
    use souk_service::handlers::ApiErrorKind;

    async fn seed_product(state: &AppState, price: f64, stock: i64) -> String {
        let doc = json!({
            "title": "Running Shoe",
            "description": "fast and light",
            "price": price,
            "quantity": stock,
            "sold": 0,
        });
        let created = state
            .store()
            .create(PRODUCTS, doc.as_object().unwrap().clone())
            .await
            .unwrap();
        created["id"].as_str().unwrap().to_string()
    }

    async fn build_cart(state: &AppState, user: &str, product_id: &str, quantity: i64) -> String {
        cart_service::add_product(
            state,
            user,
            AddToCart {
                product_id: product_id.to_string(),
                color: None,
            },
        )
        .await
        .unwrap();
        let cart = cart_service::update_item_quantity(state, user, product_id, quantity)
            .await
            .unwrap();
        cart["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_cash_order_snapshots_cart() {
        let state = AppState::new();
        let product_id = seed_product(&state, 250.0, 10).await;
        let cart_id = build_cart(&state, "u1", &product_id, 2).await;

        let order = create_cash_order(&state, "u1", &cart_id, CreateOrder::default())
            .await
            .unwrap();
        assert_eq!(order["user"], "u1");
        assert_eq!(order["total_price"], json!(500.0));
        assert_eq!(order["paid"], json!(false));
        assert_eq!(order["payment_method"], "cash");
        assert_eq!(order["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_cash_order_adjusts_stock_and_drops_cart() {
        let state = AppState::new();
        let product_id = seed_product(&state, 250.0, 10).await;
        let cart_id = build_cart(&state, "u1", &product_id, 2).await;

        create_cash_order(&state, "u1", &cart_id, CreateOrder::default())
            .await
            .unwrap();

        let product = state
            .store()
            .find_by_id(PRODUCTS, &product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product["quantity"], json!(8));
        assert_eq!(product["sold"], json!(2));

        assert!(state
            .store()
            .find_by_id(CARTS, &cart_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_cash_order_prefers_discounted_total() {
        let state = AppState::new();
        let product_id = seed_product(&state, 100.0, 10).await;
        let cart_id = build_cart(&state, "u1", &product_id, 1).await;

        // A previously applied coupon leaves the discounted total behind.
        let mut cart = state
            .store()
            .find_by_id(CARTS, &cart_id)
            .await
            .unwrap()
            .unwrap();
        cart.insert("total_price_after_discount".to_string(), json!(80.0));
        state.store().save(CARTS, cart).await.unwrap();

        let order = create_cash_order(&state, "u1", &cart_id, CreateOrder::default())
            .await
            .unwrap();
        assert_eq!(order["total_price"], json!(80.0));
    }

    #[tokio::test]
    async fn test_create_cash_order_unknown_cart() {
        let state = AppState::new();
        let err = create_cash_order(&state, "u1", "missing", CreateOrder::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.entity_id, Some("missing".to_string()));
    }

    #[tokio::test]
    async fn test_mark_paid_and_delivered() {
        let state = AppState::new();
        let product_id = seed_product(&state, 100.0, 10).await;
        let cart_id = build_cart(&state, "u1", &product_id, 1).await;
        let order = create_cash_order(&state, "u1", &cart_id, CreateOrder::default())
            .await
            .unwrap();
        let order_id = order["id"].as_str().unwrap();

        let paid = mark_paid(&state, order_id).await.unwrap();
        assert_eq!(paid["paid"], json!(true));
        assert!(paid.contains_key("paid_at"));

        let delivered = mark_delivered(&state, order_id).await.unwrap();
        assert_eq!(delivered["delivered"], json!(true));
        assert!(delivered.contains_key("delivered_at"));

        let err = mark_paid(&state, "missing").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }
}
