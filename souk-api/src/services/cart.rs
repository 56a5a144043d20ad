//! Cart service
//!
//! One cart per user. Items snapshot the product price at add time; the
//! cart total is always the sum of `price * quantity` over the items.
//! Applying a coupon computes `total_price_after_discount` without touching
//! item prices.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use souk_service::handlers::{ApiError, ApiErrorKind, ApiOperation};
use souk_service::query::{Filter, ListPlan};
use souk_service::store::{Document, DocumentStore};

use crate::models::cart::{AddToCart, COLLECTION as CARTS, KIND as CART_KIND};
use crate::models::coupon::COLLECTION as COUPONS;
use crate::models::product::{COLLECTION as PRODUCTS, KIND as PRODUCT_KIND};
use crate::state::AppState;

/// Load the cart belonging to `user_id`, if any.
pub async fn find_user_cart(
    state: &AppState,
    user_id: &str,
) -> Result<Option<Document>, ApiError> {
    let plan = ListPlan::unpaginated(Filter::eq("user", json!(user_id)));
    let mut carts = state.store().find(CARTS, &plan).await?;
    Ok(carts.pop())
}

/// Load the cart belonging to `user_id` or fail with Not-Found.
pub async fn require_user_cart(state: &AppState, user_id: &str) -> Result<Document, ApiError> {
    find_user_cart(state, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(CART_KIND, user_id))
}

/// Sum of `price * quantity` over the cart's items.
#[must_use]
pub fn total_price(cart: &Document) -> f64 {
    cart.get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let price = item.get("price").and_then(Value::as_f64).unwrap_or(0.0);
                    let quantity = item.get("quantity").and_then(Value::as_i64).unwrap_or(0);
                    price * quantity as f64
                })
                .sum()
        })
        .unwrap_or(0.0)
}

fn set_total(cart: &mut Document) {
    let total = total_price(cart);
    cart.insert("total_price".to_string(), json!(total));
}

fn items_mut(cart: &mut Document) -> &mut Vec<Value> {
    cart.entry("items")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .expect("cart items is an array")
}

/// Add a product to the user's cart, creating the cart on first use.
///
/// Adding the same product+color again increments that item's quantity
/// instead of growing the item list.
pub async fn add_product(
    state: &AppState,
    user_id: &str,
    payload: AddToCart,
) -> Result<Document, ApiError> {
    let product = state
        .store()
        .find_by_id(PRODUCTS, &payload.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found(PRODUCT_KIND, payload.product_id.clone()))?;

    let offered_colors: Vec<&str> = product
        .get("colors")
        .and_then(Value::as_array)
        .map(|colors| colors.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if !offered_colors.is_empty() {
        let requested = payload.color.as_deref().unwrap_or("");
        if !offered_colors.contains(&requested) {
            return Err(ApiError::bad_request(format!(
                "Product does not offer color {requested:?}"
            )));
        }
    }

    let stock = product.get("quantity").and_then(Value::as_i64).unwrap_or(0);
    if stock <= 0 {
        return Err(ApiError::conflict(
            ApiOperation::Update,
            "Product is out of stock",
        ));
    }

    let price = product.get("price").and_then(Value::as_f64).unwrap_or(0.0);
    let new_item = json!({
        "product": payload.product_id,
        "quantity": 1,
        "color": payload.color,
        "price": price,
    });

    let mut cart = match find_user_cart(state, user_id).await? {
        None => {
            let cart = json!({
                "user": user_id,
                "items": [new_item],
            });
            let mut cart = cart.as_object().expect("cart document").clone();
            set_total(&mut cart);
            return Ok(state.store().create(CARTS, cart).await?);
        }
        Some(cart) => cart,
    };

    let items = items_mut(&mut cart);
    let existing = items.iter_mut().find(|item| {
        item.get("product").and_then(Value::as_str) == Some(payload.product_id.as_str())
            && item.get("color").and_then(Value::as_str) == payload.color.as_deref()
    });
    match existing {
        Some(item) => {
            let quantity = item.get("quantity").and_then(Value::as_i64).unwrap_or(1);
            item["quantity"] = json!(quantity + 1);
        }
        None => items.push(new_item),
    }

    set_total(&mut cart);
    Ok(state.store().save(CARTS, cart).await?)
}

/// Set one item's quantity. Not-Found when the user has no cart or the
/// product is not in it.
pub async fn update_item_quantity(
    state: &AppState,
    user_id: &str,
    product_id: &str,
    quantity: i64,
) -> Result<Document, ApiError> {
    let mut cart = require_user_cart(state, user_id).await?;

    let items = items_mut(&mut cart);
    let item = items
        .iter_mut()
        .find(|item| item.get("product").and_then(Value::as_str) == Some(product_id))
        .ok_or_else(|| {
            ApiError::new(
                ApiOperation::Update,
                ApiErrorKind::NotFound,
                "Product not found in cart",
            )
            .with_entity(PRODUCT_KIND, product_id)
        })?;
    item["quantity"] = json!(quantity);

    set_total(&mut cart);
    Ok(state.store().save(CARTS, cart).await?)
}

/// Remove every item of `product_id` from the user's cart, any color.
pub async fn remove_item(
    state: &AppState,
    user_id: &str,
    product_id: &str,
) -> Result<Document, ApiError> {
    let mut cart = require_user_cart(state, user_id).await?;

    let items = items_mut(&mut cart);
    items.retain(|item| item.get("product").and_then(Value::as_str) != Some(product_id));

    set_total(&mut cart);
    Ok(state.store().save(CARTS, cart).await?)
}

/// Drop the user's cart entirely. Succeeds whether or not one existed.
pub async fn clear(state: &AppState, user_id: &str) -> Result<(), ApiError> {
    if let Some(cart) = find_user_cart(state, user_id).await? {
        if let Some(id) = cart.get("id").and_then(Value::as_str) {
            state.store().delete_by_id(CARTS, id).await?;
            tracing::debug!(user = %user_id, "cart cleared");
        }
    }
    Ok(())
}

/// Apply a coupon code to the user's cart.
///
/// The code must name an unexpired coupon; the discounted total is clamped
/// at zero and rounded to cents. Item prices are never mutated.
pub async fn apply_coupon(
    state: &AppState,
    user_id: &str,
    code: &str,
) -> Result<Document, ApiError> {
    let plan = ListPlan::unpaginated(Filter::eq("name", json!(code)));
    let coupon = state
        .store()
        .find(COUPONS, &plan)
        .await?
        .pop()
        .ok_or_else(|| invalid_coupon(code))?;

    let expire = coupon
        .get("expire")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<DateTime<Utc>>().ok());
    match expire {
        Some(expire) if expire >= Utc::now() => {}
        _ => return Err(invalid_coupon(code)),
    }

    let mut cart = require_user_cart(state, user_id).await?;
    let total = total_price(&cart);

    let discount = coupon.get("discount").and_then(Value::as_f64).unwrap_or(0.0);
    let discounted = match coupon.get("discount_type").and_then(Value::as_str) {
        Some("fixed") => total - discount,
        _ => total - total * discount / 100.0,
    };
    let discounted = (discounted.max(0.0) * 100.0).round() / 100.0;

    cart.insert("total_price_after_discount".to_string(), json!(discounted));
    tracing::info!(user = %user_id, coupon = %code, total = discounted, "coupon applied");
    Ok(state.store().save(CARTS, cart).await?)
}

fn invalid_coupon(code: &str) -> ApiError {
    ApiError::new(
        ApiOperation::Update,
        ApiErrorKind::NotFound,
        "Invalid or expired coupon",
    )
    .with_entity("Coupon", code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use souk_service::handlers::ApiErrorKind;

    async fn seed_product(state: &AppState, price: f64, colors: &[&str], stock: i64) -> String {
        let doc = json!({
            "title": "Running Shoe",
            "description": "fast and light",
            "price": price,
            "quantity": stock,
            "colors": colors,
            "sold": 0,
        });
        let created = state
            .store()
            .create(PRODUCTS, doc.as_object().unwrap().clone())
            .await
            .unwrap();
        created["id"].as_str().unwrap().to_string()
    }

    async fn seed_coupon(state: &AppState, name: &str, discount: f64, expires_in_days: i64) {
        let expire = (Utc::now() + Duration::days(expires_in_days)).to_rfc3339();
        let doc = json!({
            "name": name,
            "discount": discount,
            "discount_type": "percentage",
            "expire": expire,
        });
        state
            .store()
            .create(COUPONS, doc.as_object().unwrap().clone())
            .await
            .unwrap();
    }

    fn add(product_id: &str, color: Option<&str>) -> AddToCart {
        AddToCart {
            product_id: product_id.to_string(),
            color: color.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_add_product_creates_cart_with_total() {
        let state = AppState::new();
        let product_id = seed_product(&state, 100.0, &["red"], 5).await;

        let cart = add_product(&state, "u1", add(&product_id, Some("red")))
            .await
            .unwrap();
        assert_eq!(cart["user"], "u1");
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["total_price"], json!(100.0));
    }

    #[tokio::test]
    async fn test_add_same_product_and_color_increments_quantity() {
        let state = AppState::new();
        let product_id = seed_product(&state, 100.0, &["red"], 5).await;

        add_product(&state, "u1", add(&product_id, Some("red")))
            .await
            .unwrap();
        let cart = add_product(&state, "u1", add(&product_id, Some("red")))
            .await
            .unwrap();

        let items = cart["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["quantity"], json!(2));
        assert_eq!(cart["total_price"], json!(200.0));
    }

    #[tokio::test]
    async fn test_add_different_color_is_a_new_item() {
        let state = AppState::new();
        let product_id = seed_product(&state, 50.0, &["red", "blue"], 5).await;

        add_product(&state, "u1", add(&product_id, Some("red")))
            .await
            .unwrap();
        let cart = add_product(&state, "u1", add(&product_id, Some("blue")))
            .await
            .unwrap();
        assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_not_found() {
        let state = AppState::new();
        let err = add_product(&state, "u1", add("missing", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.entity_id, Some("missing".to_string()));
    }

    #[tokio::test]
    async fn test_add_unoffered_color_is_rejected() {
        let state = AppState::new();
        let product_id = seed_product(&state, 50.0, &["red"], 5).await;
        let err = add_product(&state, "u1", add(&product_id, Some("green")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_add_out_of_stock_is_conflict() {
        let state = AppState::new();
        let product_id = seed_product(&state, 50.0, &[], 0).await;
        let err = add_product(&state, "u1", add(&product_id, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_item_quantity_recomputes_total() {
        let state = AppState::new();
        let product_id = seed_product(&state, 40.0, &[], 9).await;
        add_product(&state, "u1", add(&product_id, None)).await.unwrap();

        let cart = update_item_quantity(&state, "u1", &product_id, 3)
            .await
            .unwrap();
        assert_eq!(cart["items"][0]["quantity"], json!(3));
        assert_eq!(cart["total_price"], json!(120.0));
    }

    #[tokio::test]
    async fn test_update_quantity_of_absent_product() {
        let state = AppState::new();
        let product_id = seed_product(&state, 40.0, &[], 9).await;
        add_product(&state, "u1", add(&product_id, None)).await.unwrap();

        let err = update_item_quantity(&state, "u1", "other", 3)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert!(err.message.contains("not found in cart"));
    }

    #[tokio::test]
    async fn test_remove_item_drops_every_color() {
        let state = AppState::new();
        let product_id = seed_product(&state, 50.0, &["red", "blue"], 5).await;
        add_product(&state, "u1", add(&product_id, Some("red")))
            .await
            .unwrap();
        add_product(&state, "u1", add(&product_id, Some("blue")))
            .await
            .unwrap();

        let cart = remove_item(&state, "u1", &product_id).await.unwrap();
        assert!(cart["items"].as_array().unwrap().is_empty());
        assert_eq!(cart["total_price"], json!(0.0));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let state = AppState::new();
        let product_id = seed_product(&state, 50.0, &[], 5).await;
        add_product(&state, "u1", add(&product_id, None)).await.unwrap();

        clear(&state, "u1").await.unwrap();
        assert!(find_user_cart(&state, "u1").await.unwrap().is_none());
        clear(&state, "u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_apply_percentage_coupon() {
        let state = AppState::new();
        let product_id = seed_product(&state, 500.0, &[], 5).await;
        add_product(&state, "u1", add(&product_id, None)).await.unwrap();
        update_item_quantity(&state, "u1", &product_id, 2)
            .await
            .unwrap();
        seed_coupon(&state, "SAVE20", 20.0, 30).await;

        let cart = apply_coupon(&state, "u1", "SAVE20").await.unwrap();
        assert_eq!(cart["total_price"], json!(1000.0));
        assert_eq!(cart["total_price_after_discount"], json!(800.0));
        // Item prices stay untouched.
        assert_eq!(cart["items"][0]["price"], json!(500.0));
    }

    #[tokio::test]
    async fn test_apply_expired_coupon_is_rejected() {
        let state = AppState::new();
        let product_id = seed_product(&state, 100.0, &[], 5).await;
        add_product(&state, "u1", add(&product_id, None)).await.unwrap();
        seed_coupon(&state, "OLD", 20.0, -1).await;

        let err = apply_coupon(&state, "u1", "OLD").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert!(err.message.contains("Invalid or expired"));
    }

    #[tokio::test]
    async fn test_apply_unknown_coupon_is_rejected() {
        let state = AppState::new();
        let err = apply_coupon(&state, "u1", "NOPE").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_fixed_coupon_clamps_at_zero() {
        let state = AppState::new();
        let product_id = seed_product(&state, 10.0, &[], 5).await;
        add_product(&state, "u1", add(&product_id, None)).await.unwrap();

        let expire = (Utc::now() + Duration::days(1)).to_rfc3339();
        let doc = json!({
            "name": "BIGFIX",
            "discount": 50.0,
            "discount_type": "fixed",
            "expire": expire,
        });
        state
            .store()
            .create(COUPONS, doc.as_object().unwrap().clone())
            .await
            .unwrap();

        let cart = apply_coupon(&state, "u1", "BIGFIX").await.unwrap();
        assert_eq!(cart["total_price_after_discount"], json!(0.0));
    }
}
