use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Catalog Value Objects
// ============================================================================

/// Stable identifier of a catalog item; the only join key between the
/// catalog and a cart selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sellable item as shown in the catalog.
///
/// `image`, `description` and `category` are optional; an empty string is
/// treated the same as absence once the item is loaded into a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
            image: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Collapse empty optional strings into `None`.
    pub(crate) fn normalized(mut self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        self.description = non_empty(self.description);
        self.image = non_empty(self.image);
        self.category = non_empty(self.category);
        self
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = CatalogItem::new(7, "Aurora Lamp", 89.0)
            .with_description("Soft light")
            .with_category("lighting");

        assert_eq!(item.id, ItemId(7));
        assert_eq!(item.name, "Aurora Lamp");
        assert_eq!(item.description.as_deref(), Some("Soft light"));
        assert_eq!(item.category.as_deref(), Some("lighting"));
        assert!(item.image.is_none());
    }

    #[test]
    fn test_normalized_drops_empty_strings() {
        let item = CatalogItem::new(1, "Chair", 10.0)
            .with_image("")
            .with_category("")
            .with_description("kept")
            .normalized();

        assert!(item.image.is_none());
        assert!(item.category.is_none());
        assert_eq!(item.description.as_deref(), Some("kept"));
    }

    #[test]
    fn test_item_deserializes_without_optional_fields() {
        let json = r#"{"id": 3, "name": "Maple Desk", "price": 299.0}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, ItemId(3));
        assert_eq!(item.price, 299.0);
        assert!(item.category.is_none());
    }

    #[test]
    fn test_item_id_is_transparent_in_json() {
        let json = serde_json::to_string(&ItemId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
