//! Product records as stored in the document collection.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// A product, keyed by its EAN barcode.
///
/// Unknown stored fields (the store's own `_id` among them) are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// European Article Number, the business key.
    pub ean: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub url: String,
    /// Ingredient name → quantity.
    #[serde(default)]
    pub ingredients: BTreeMap<String, String>,
    /// Pigment name → quantity.
    #[serde(default)]
    pub pigments: BTreeMap<String, String>,
    /// Hazard category → classification.
    #[serde(default)]
    pub safety_classifications: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_document() {
        let product: Product = serde_json::from_value(json!({
            "_id": "65f0c3b2e4b0a1a2b3c4d5e6",
            "ean": "4006381333931",
            "title": "Lip Tint",
            "price": 12.5,
            "url": "https://shop.example/lip-tint"
        }))
        .unwrap();

        assert_eq!(product.ean, "4006381333931");
        assert!(product.images.is_empty());
        assert!(product.pigments.is_empty());
        assert_eq!(product.quantity, None);
    }

    #[test]
    fn test_mappings_preserved() {
        let product: Product = serde_json::from_value(json!({
            "ean": "1",
            "title": "Blush",
            "price": 9.0,
            "quantity": "5 g",
            "images": ["a.jpg", "b.jpg"],
            "url": "https://shop.example/blush",
            "ingredients": {"talc": "40%", "mica": "20%"},
            "pigments": {"CI 77491": "2%"},
            "safety_classifications": {"eye": "safe"}
        }))
        .unwrap();

        assert_eq!(product.ingredients.get("mica").map(String::as_str), Some("20%"));
        assert_eq!(product.images.len(), 2);

        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["pigments"]["CI 77491"], "2%");
        assert_eq!(out["safety_classifications"]["eye"], "safe");
    }
}
