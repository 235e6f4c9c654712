use serde::{Deserialize, Serialize};

use crate::domain::catalog::{CatalogItem, ItemId};

// ============================================================================
// Cart Value Objects
// ============================================================================

/// One row of the cart view, derived from a catalog item and its quantity.
/// Never stored; rebuilt on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

impl LineItem {
    pub fn new(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            line_total: item.price * f64::from(quantity),
        }
    }
}

/// Consistent snapshot of every cart query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartSummary {
    pub line_items: Vec<LineItem>,
    pub item_count: u64,
    pub total_price: f64,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let chair = CatalogItem::new(1, "Chair", 149.0);
        let line = LineItem::new(&chair, 2);

        assert_eq!(line.id, ItemId(1));
        assert_eq!(line.name, "Chair");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total, 298.0);
    }

    #[test]
    fn test_summary_serialization() {
        let desk = CatalogItem::new(2, "Desk", 299.0);
        let summary = CartSummary {
            line_items: vec![LineItem::new(&desk, 1)],
            item_count: 1,
            total_price: 299.0,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["line_items"][0]["name"], "Desk");
        assert_eq!(json["line_items"][0]["line_total"], 299.0);
        assert_eq!(json["item_count"], 1);
    }
}
