//! Brand payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store collection for brands
pub const COLLECTION: &str = "brands";
/// Entity kind used in error messages
pub const KIND: &str = "Brand";

/// Payload for creating a brand.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBrand {
    #[validate(length(min = 3, max = 32, message = "brand name must be 3 to 32 characters"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Payload for updating a brand; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateBrand {
    #[validate(length(min = 3, max = 32, message = "brand name must be 3 to 32 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{to_document, validate_payload};

    #[test]
    fn test_create_brand_validation() {
        let ok = CreateBrand {
            name: "Acme".to_string(),
            image: None,
        };
        assert!(validate_payload(&ok).is_ok());

        let too_short = CreateBrand {
            name: "ab".to_string(),
            image: None,
        };
        assert!(validate_payload(&too_short).is_err());
    }

    #[test]
    fn test_update_brand_skips_absent_fields() {
        let patch = UpdateBrand {
            name: Some("Apex".to_string()),
            image: None,
        };
        let doc = to_document(&patch).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("name"));
    }
}
