// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// - catalog: the fixed list of sellable items (leaf)
// - cart:    the selection and its derived views (depends on catalog)
//
// Nothing here knows about actors, metrics or logging setup.
//
// ============================================================================

pub mod catalog;
pub mod cart;
