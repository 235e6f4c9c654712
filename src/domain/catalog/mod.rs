// ============================================================================
// Catalog Domain
// ============================================================================
//
// - Value objects (ItemId, CatalogItem)
// - Errors (CatalogError)
// - Catalog (lookup, category filtering, JSON bootstrap)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
#[allow(clippy::module_inception)]
pub mod catalog;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use catalog::*;
