// ============================================================================
// Cart Domain - Order aggregation over a catalog
// ============================================================================
//
// - Value objects (LineItem, CartSummary)
// - Commands (CartCommand)
// - Events (CartEvent)
// - Aggregate (OrderAggregator)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod events;
pub mod aggregate;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use events::*;
pub use aggregate::*;
