//! Product payloads
//!
//! Products are the search-heavy resource: keyword search matches title and
//! description, and fetch-one eager-loads the product's reviews. The
//! `sold`, `ratings_average`, and `ratings_quantity` fields are maintained
//! by the checkout and review services, never accepted from clients.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for products
pub const COLLECTION: &str = "products";
/// Entity kind used in error messages
pub const KIND: &str = "Product";

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 3, message = "product title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 20, message = "product description must be at least 20 characters"))]
    pub description: String,
    #[validate(range(min = 0, message = "product quantity must not be negative"))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "product price must not be negative"))]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_after_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    pub image_cover: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Units sold; starts at zero and is advanced by checkout.
    #[serde(default)]
    pub sold: i64,
}

/// Payload for updating a product; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 3, message = "product title must be at least 3 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 20, message = "product description must be at least 20 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "product quantity must not be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[validate(range(min = 0.0, message = "product price must not be negative"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_after_discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{to_document, validate_payload};

    fn valid_create() -> CreateProduct {
        CreateProduct {
            title: "Running Shoe".to_string(),
            description: "A light, fast shoe for daily training".to_string(),
            quantity: 10,
            price: 120.0,
            price_after_discount: None,
            colors: vec!["red".to_string()],
            image_cover: "cover.jpg".to_string(),
            images: vec![],
            category: "c1".to_string(),
            subcategories: vec![],
            brand: None,
            sold: 0,
        }
    }

    #[test]
    fn test_create_product_valid() {
        assert!(validate_payload(&valid_create()).is_ok());
    }

    #[test]
    fn test_create_product_short_description_rejected() {
        let mut payload = valid_create();
        payload.description = "too short".to_string();
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn test_create_product_document_shape() {
        let doc = to_document(&valid_create()).unwrap();
        assert_eq!(doc["title"], "Running Shoe");
        assert_eq!(doc["sold"], 0);
        assert!(!doc.contains_key("brand"));
        assert!(!doc.contains_key("images"));
    }
}
