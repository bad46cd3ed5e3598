use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry.
///
/// Products only feed the storefront UI and the line-item snapshots taken at
/// order time; nothing in the order workflow reads them back after that.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub sizes: Vec<String>,
    /// Media storage path references, in display order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied part of a product, before the store assigns identity.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_draft_deserializes_seed_shape() {
        let json = r#"{
            "name": "The Aura | oversized unisex T-shirt",
            "description": "Premium oversized unisex t-shirt.",
            "price": 799,
            "originalPrice": 1399,
            "sizes": ["S", "M", "L", "XL", "XXL"],
            "images": ["/uploads/p1f.jpeg", "/uploads/p1b.jpeg"]
        }"#;
        let draft: ProductDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.sizes.len(), 5);
        assert_eq!(draft.images[0], "/uploads/p1f.jpeg");
    }
}
