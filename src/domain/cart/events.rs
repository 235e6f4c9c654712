use serde::{Deserialize, Serialize};

use crate::aggregation::DomainEvent;
use crate::domain::catalog::ItemId;

// ============================================================================
// Cart Events - One per effective selection change
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// `quantity` is the new quantity of the item
    ItemAdded { id: ItemId, quantity: u32 },
    /// `quantity` is the new quantity; 0 means the entry was deleted
    ItemRemoved { id: ItemId, quantity: u32 },
    /// `units` is the item count the cart held before clearing
    Cleared { units: u64 },
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "ItemAdded",
            CartEvent::ItemRemoved { .. } => "ItemRemoved",
            CartEvent::Cleared { .. } => "Cleared",
        }
    }
}
