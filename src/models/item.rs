//! Item payloads accepted by the item routes.

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// A validated item body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub tax: Option<f64>,
}

/// An [`Item`] wrapped under an `item` key.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmbeddedItem {
    #[validate(nested)]
    pub item: Item,
}

/// Loose item record kept in the in-process stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ItemFake {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default = "default_tax")]
    pub tax: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_tax() -> f64 {
    10.5
}

impl Default for ItemFake {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            price: None,
            tax: default_tax(),
            tags: Vec::new(),
        }
    }
}

/// A partial [`ItemFake`]: only the fields present in the body are `Some`.
///
/// Nullable fields use a nested option so an explicit `null` clears the
/// stored value while an absent key leaves it alone. `tax` and `tags` are
/// not nullable: a `null` for either is a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ItemFakePatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "required")]
    pub tax: Option<f64>,
    #[serde(default, deserialize_with = "required")]
    pub tags: Option<Vec<String>>,
}

fn required<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ItemFake {
    /// Copy of `self` with the fields set in `patch` replaced.
    pub fn merged(&self, patch: ItemFakePatch) -> ItemFake {
        ItemFake {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            description: patch.description.unwrap_or_else(|| self.description.clone()),
            price: patch.price.unwrap_or(self.price),
            tax: patch.tax.unwrap_or(self.tax),
            tags: patch.tags.unwrap_or_else(|| self.tags.clone()),
        }
    }
}

/// Query string of `GET /items/`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ItemsQuery {
    #[validate(length(min = 3, max = 50), custom(function = "fixed_query"))]
    pub q: Option<String>,
}

fn fixed_query(value: &str) -> Result<(), ValidationError> {
    if value == "fixedquery" {
        Ok(())
    } else {
        let mut error = ValidationError::new("string_pattern_mismatch");
        error.message = Some("String should match pattern '^fixedquery$'".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_description_limit() {
        let mut item = Item {
            name: "Foo".into(),
            description: Some("x".repeat(300)),
            price: 35.4,
            tax: Some(3.2),
        };
        assert!(item.validate().is_ok());

        item.description = Some("x".repeat(301));
        let errors = item.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_embedded_item_validates_nested() {
        let body: EmbeddedItem = serde_json::from_value(json!({
            "item": {"name": "Foo", "price": 1.0, "description": "x".repeat(400)}
        }))
        .unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_items_query() {
        assert!(ItemsQuery { q: None }.validate().is_ok());
        assert!(ItemsQuery { q: Some("fixedquery".into()) }.validate().is_ok());
        assert!(ItemsQuery { q: Some("ab".into()) }.validate().is_err());
        assert!(ItemsQuery { q: Some("otherquery".into()) }.validate().is_err());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let stored = ItemFake {
            name: Some("Bar".into()),
            description: Some("The bartenders".into()),
            price: Some(62.0),
            tax: 20.2,
            tags: vec![],
        };

        let patch: ItemFakePatch =
            serde_json::from_value(json!({"price": 70.0, "description": null})).unwrap();
        let merged = stored.merged(patch);

        assert_eq!(merged.name.as_deref(), Some("Bar"));
        assert_eq!(merged.description, None);
        assert_eq!(merged.price, Some(70.0));
        assert_eq!(merged.tax, 20.2);
    }

    #[test]
    fn test_patch_rejects_null_for_non_nullable() {
        assert!(serde_json::from_value::<ItemFakePatch>(json!({"tax": null})).is_err());
        assert!(serde_json::from_value::<ItemFakePatch>(json!({"tags": null})).is_err());

        let patch: ItemFakePatch = serde_json::from_value(json!({"tax": 1.5})).unwrap();
        assert_eq!(patch.tax, Some(1.5));
        assert!(patch.tags.is_none());
    }

    #[test]
    fn test_item_fake_defaults() {
        let item: ItemFake = serde_json::from_value(json!({"name": "Foo"})).unwrap();
        assert_eq!(item.tax, 10.5);
        assert!(item.tags.is_empty());
        assert_eq!(item, ItemFake { name: Some("Foo".into()), ..ItemFake::default() });
    }
}
