//! Resource payload models
//!
//! One module per persisted resource: the collection constants plus the
//! validated create/update payloads accepted at the route boundary.
//! Payloads are converted to documents before they reach the store; the
//! store and the generic handlers never see these types.

pub mod brand;
pub mod cart;
pub mod category;
pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod subcategory;
pub mod user;

use serde::Serialize;
use serde_json::Value;
use souk_service::handlers::ApiError;
use souk_service::store::Document;
use validator::Validate;

/// Serialize a payload into a document for the store.
pub fn to_document<T: Serialize>(payload: &T) -> Result<Document, ApiError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::internal("payload did not serialize to an object")),
        Err(err) => Err(ApiError::internal(err.to_string())),
    }
}

/// Run derive-based validation, surfacing failures as a 422 with the field
/// messages joined.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        messages.sort();
        ApiError::validation_failed(messages.join("; "))
    })
}

/// Derive a URL slug from a human-readable name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// A pre-save hook deriving `slug` from the given source field.
pub fn slug_from(source: &'static str) -> impl Fn(&mut Document) + Send + Sync + 'static {
    move |doc: &mut Document| {
        if let Some(name) = doc.get(source).and_then(Value::as_str) {
            let slug = slugify(name);
            doc.insert("slug".to_string(), Value::String(slug));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme Tools"), "acme-tools");
        assert_eq!(slugify("  Señor   Café  "), "señor-café");
        assert_eq!(slugify("Shoes & Boots!"), "shoes-boots");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slug_from_hook() {
        let hook = slug_from("name");
        let mut doc = json!({"name": "Acme Tools"}).as_object().unwrap().clone();
        hook(&mut doc);
        assert_eq!(doc.get("slug"), Some(&json!("acme-tools")));
    }

    #[test]
    fn test_slug_from_hook_without_source_is_noop() {
        let hook = slug_from("name");
        let mut doc = json!({"title": "x"}).as_object().unwrap().clone();
        hook(&mut doc);
        assert!(!doc.contains_key("slug"));
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&json!([1, 2])).is_err());
        assert!(to_document(&json!({"a": 1})).is_ok());
    }
}
