use std::collections::HashMap;
use std::path::Path;

use super::errors::CatalogError;
use super::value_objects::{CatalogItem, ItemId};

// ============================================================================
// Catalog - Fixed list of purchasable items
// ============================================================================
//
// Populated once at startup (or on an explicit reload) and read-only
// otherwise. Lookups by id go through an index built at load time; the
// distinct category list is cached at the same point, so every `load`
// invalidates both.
//
// Duplicate ids are rejected: a `load` that fails validation leaves the
// previous contents in place.
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
    categories: Vec<String>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog populated with `items`
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.load(items)?;
        Ok(catalog)
    }

    /// Parse a JSON array of catalog items
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = json.len(), "Read catalog file");

        Self::from_json_str(&json)
    }

    /// Replace the full item list.
    ///
    /// Items are validated as a whole before anything is replaced: an empty
    /// name, a negative or non-finite price, or a repeated id rejects the
    /// entire batch.
    pub fn load(&mut self, items: impl IntoIterator<Item = CatalogItem>) -> Result<(), CatalogError> {
        let items: Vec<CatalogItem> = items.into_iter().map(CatalogItem::normalized).collect();

        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            Self::validate_item(item)?;

            if index.insert(item.id, position).is_some() {
                tracing::warn!(id = %item.id, "Rejecting catalog with duplicate item id");
                return Err(CatalogError::DuplicateId(item.id));
            }
        }

        let mut categories: Vec<String> = Vec::new();
        for category in items.iter().filter_map(|item| item.category.as_ref()) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }

        tracing::info!(
            items = items.len(),
            categories = categories.len(),
            "Catalog loaded"
        );

        self.items = items;
        self.index = index;
        self.categories = categories;

        Ok(())
    }

    fn validate_item(item: &CatalogItem) -> Result<(), CatalogError> {
        if item.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(item.id));
        }

        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                id: item.id,
                price: item.price,
            });
        }

        Ok(())
    }

    /// Look up an item; absence is a normal outcome
    pub fn find_by_id(&self, id: ItemId) -> Option<&CatalogItem> {
        self.index.get(&id).map(|&position| &self.items[position])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Every item, in insertion order
    pub fn all(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items whose category matches exactly (case-sensitive), in catalog order
    pub fn by_category(&self, category: &str) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category.as_deref() == Some(category))
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The furniture catalog shipped with the demo.
pub fn default_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(1, "Nordic Chair", 149.0)
            .with_description("Clean lines and natural wood."),
        CatalogItem::new(2, "Maple Desk", 299.0)
            .with_description("Solid maple workspace with room for dual monitors."),
        CatalogItem::new(3, "Aurora Lamp", 89.0)
            .with_description("Soft, diffused light for evening work sessions."),
    ]
}

// ============================================================================
// Unit Tests
// ============================================================================
