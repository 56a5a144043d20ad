//! Route wiring
//!
//! Every resource mounts under `/api/v1`. List endpoints share the reserved
//! query vocabulary (`page`, `sort`, `limit`, `fields`, `keyword`, and
//! `field[gt|gte|lt|lte|in]` filters) through the generic handlers.

pub mod addresses;
pub mod brands;
pub mod carts;
pub mod categories;
pub mod coupons;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod subcategories;
pub mod users;
pub mod wishlist;

use axum::Router;

use crate::state::AppState;

/// The full API router, ready for `with_state`.
pub fn api_router() -> Router<AppState> {
    let v1 = Router::new()
        .nest("/brands", brands::router())
        .nest("/categories", categories::router())
        .nest("/subcategories", subcategories::router())
        .nest("/products", products::router())
        .nest("/reviews", reviews::router())
        .nest("/coupons", coupons::router())
        .nest("/users", users::router())
        .nest("/cart", carts::router())
        .nest("/orders", orders::router())
        .nest("/wishlist", wishlist::router())
        .nest("/addresses", addresses::router());

    Router::new().nest("/api/v1", v1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let state = AppState::new();
        (api_router().with_state(state.clone()), state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn put_json(uri: &str, body: Value) -> Request<Body> {
        Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn as_user(mut request: Request<Body>, user_id: &str) -> Request<Body> {
        request
            .headers_mut()
            .insert("x-user-id", user_id.parse().unwrap());
        request
    }

    async fn create_product(app: &Router, title: &str, price: f64, stock: i64) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/products",
                json!({
                    "title": title,
                    "description": "a dependable item for daily use",
                    "quantity": stock,
                    "price": price,
                    "image_cover": "cover.jpg",
                    "category": "c1",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_brand_crud_flow() {
        let (app, _) = app();

        let (status, body) =
            send(&app, post_json("/api/v1/brands", json!({"name": "Acme"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "Acme");
        assert_eq!(body["data"]["slug"], "acme");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Request::get(format!("/api/v1/brands/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Acme");

        let (status, body) = send(
            &app,
            put_json(&format!("/api/v1/brands/{id}"), json!({"name": "Apex Gear"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["slug"], "apex-gear");

        let (status, _) = send(
            &app,
            Request::delete(format!("/api/v1/brands/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app,
            Request::get(format!("/api/v1/brands/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["entity_id"], id);
    }

    #[tokio::test]
    async fn test_brand_validation_failure_is_422() {
        let (app, _) = app();
        let (status, body) = send(&app, post_json("/api/v1/brands", json!({"name": "ab"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn test_product_list_pagination_envelope() {
        let (app, _) = app();
        for index in 0..12 {
            create_product(&app, &format!("product {index}"), 10.0 + index as f64, 5).await;
        }

        let (status, body) = send(
            &app,
            Request::get("/api/v1/products").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resultsCount"], 5);
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["numberOfPages"], 3);
        assert_eq!(body["pagination"]["next"], 2);
        assert!(body["pagination"].get("prev").is_none());

        let (_, body) = send(
            &app,
            Request::get("/api/v1/products?page=3&limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["resultsCount"], 2);
        assert_eq!(body["pagination"]["prev"], 2);
        assert!(body["pagination"].get("next").is_none());
    }

    #[tokio::test]
    async fn test_product_keyword_and_filter_query() {
        let (app, _) = app();
        create_product(&app, "Running Shoe", 120.0, 5).await;
        create_product(&app, "Leather Boot", 200.0, 5).await;

        let (_, body) = send(
            &app,
            Request::get("/api/v1/products?keyword=shoe")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["resultsCount"], 1);
        assert_eq!(body["data"][0]["title"], "Running Shoe");

        let (_, body) = send(
            &app,
            Request::get("/api/v1/products?price%5Bgte%5D=150")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["resultsCount"], 1);
        assert_eq!(body["data"][0]["title"], "Leather Boot");
    }

    #[tokio::test]
    async fn test_cart_requires_identity() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Request::get("/api/v1/cart").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_cart_flow_over_http() {
        let (app, _) = app();
        let product_id = create_product(&app, "Running Shoe", 100.0, 5).await;

        let (status, _) = send(
            &app,
            as_user(
                post_json("/api/v1/cart", json!({"product_id": product_id})),
                "u1",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            as_user(Request::get("/api/v1/cart").body(Body::empty()).unwrap(), "u1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["itemsCount"], 1);
        assert_eq!(body["data"]["total_price"], 100.0);

        let (status, _) = send(
            &app,
            as_user(
                Request::delete("/api/v1/cart").body(Body::empty()).unwrap(),
                "u1",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_nested_review_updates_product_aggregate() {
        let (app, _) = app();
        let product_id = create_product(&app, "Running Shoe", 100.0, 5).await;

        let uri = format!("/api/v1/products/{product_id}/reviews");
        let (status, _) = send(
            &app,
            as_user(
                post_json(&uri, json!({"ratings": 2.0, "comment": "wears out quickly"})),
                "u1",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            &app,
            as_user(
                post_json(&uri, json!({"ratings": 4.0, "comment": "good value overall"})),
                "u2",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(
            &app,
            Request::get(format!("/api/v1/products/{product_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body["data"]["ratings_average"], 3.0);
        assert_eq!(body["data"]["ratings_quantity"], 2);
        assert_eq!(body["data"]["reviews"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(body["resultsCount"], 2);
    }

    #[tokio::test]
    async fn test_checkout_flow_over_http() {
        let (app, state) = app();
        let product_id = create_product(&app, "Running Shoe", 100.0, 5).await;

        send(
            &app,
            as_user(
                post_json("/api/v1/cart", json!({"product_id": product_id})),
                "u1",
            ),
        )
        .await;
        let cart = crate::services::cart::find_user_cart(&state, "u1")
            .await
            .unwrap()
            .unwrap();
        let cart_id = cart["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            as_user(post_json(&format!("/api/v1/orders/{cart_id}"), json!({})), "u1"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["total_price"], 100.0);
        let order_id = body["data"]["id"].as_str().unwrap().to_string();

        let (_, body) = send(
            &app,
            as_user(
                Request::get("/api/v1/orders").body(Body::empty()).unwrap(),
                "u1",
            ),
        )
        .await;
        assert_eq!(body["resultsCount"], 1);

        // Another user sees none of them.
        let (_, body) = send(
            &app,
            as_user(
                Request::get("/api/v1/orders").body(Body::empty()).unwrap(),
                "u2",
            ),
        )
        .await;
        assert_eq!(body["resultsCount"], 0);
        assert_eq!(body["pagination"]["numberOfPages"], 0);

        let (status, body) = send(
            &app,
            as_user(
                put_json(&format!("/api/v1/orders/{order_id}/pay"), json!({})),
                "u1",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["paid"], true);
    }

    #[tokio::test]
    async fn test_wishlist_and_addresses_flow() {
        let (app, _) = app();
        let product_id = create_product(&app, "Running Shoe", 100.0, 5).await;

        let (_, body) = send(
            &app,
            post_json(
                "/api/v1/users",
                json!({"name": "Amina", "email": "amina@example.com"}),
            ),
        )
        .await;
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            as_user(
                post_json("/api/v1/wishlist", json!({"product_id": product_id})),
                &user_id,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(
            &app,
            as_user(
                Request::get("/api/v1/wishlist").body(Body::empty()).unwrap(),
                &user_id,
            ),
        )
        .await;
        assert_eq!(body["data"]["wishlist"][0]["title"], "Running Shoe");

        let (status, body) = send(
            &app,
            as_user(
                post_json(
                    "/api/v1/addresses",
                    json!({"alias": "home", "details": "12 Harbor Street"}),
                ),
                &user_id,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let address_id = body["data"][0]["id"].as_str().unwrap().to_string();

        let (_, body) = send(
            &app,
            as_user(
                Request::get("/api/v1/addresses").body(Body::empty()).unwrap(),
                &user_id,
            ),
        )
        .await;
        assert_eq!(body["resultsCount"], 1);

        let (_, body) = send(
            &app,
            as_user(
                Request::delete(format!("/api/v1/addresses/{address_id}"))
                    .body(Body::empty())
                    .unwrap(),
                &user_id,
            ),
        )
        .await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_nested_subcategory_scoping() {
        let (app, _) = app();
        let (_, body) = send(
            &app,
            post_json("/api/v1/categories", json!({"name": "Footwear"})),
        )
        .await;
        let category_id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/categories/{category_id}/subcategories");
        let (status, body) = send(&app, post_json(&uri, json!({"name": "Boots"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["category"], category_id.as_str());

        send(
            &app,
            post_json(
                "/api/v1/subcategories",
                json!({"name": "Hats", "category": "other"}),
            ),
        )
        .await;

        let (_, body) = send(&app, Request::get(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(body["resultsCount"], 1);
        assert_eq!(body["data"][0]["name"], "Boots");
    }
}
