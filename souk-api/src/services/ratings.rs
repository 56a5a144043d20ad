//! Review aggregate maintenance
//!
//! The product's `ratings_average` and `ratings_quantity` are derived from
//! its reviews and recomputed after every review mutation. The aggregate
//! zeroes out when the last review disappears.

use serde_json::{json, Value};
use souk_service::handlers::ApiError;
use souk_service::query::{Filter, ListPlan};
use souk_service::store::DocumentStore;

use crate::models::product::COLLECTION as PRODUCTS;
use crate::models::review::COLLECTION as REVIEWS;
use crate::state::AppState;

/// Recompute a product's review aggregate from its current reviews.
///
/// A missing product is a no-op so a late recalculation never fails the
/// review operation that triggered it.
pub async fn recalculate_product_ratings(
    state: &AppState,
    product_id: &str,
) -> Result<(), ApiError> {
    let plan = ListPlan::unpaginated(Filter::eq("product", json!(product_id)));
    let reviews = state.store().find(REVIEWS, &plan).await?;

    let quantity = reviews.len() as i64;
    let average = if quantity > 0 {
        let sum: f64 = reviews
            .iter()
            .map(|review| review.get("ratings").and_then(Value::as_f64).unwrap_or(0.0))
            .sum();
        sum / quantity as f64
    } else {
        0.0
    };

    let patch = json!({
        "ratings_average": average,
        "ratings_quantity": quantity,
    });
    state
        .store()
        .find_by_id_and_update(
            PRODUCTS,
            product_id,
            patch.as_object().expect("patch document").clone(),
        )
        .await?;
    Ok(())
}
