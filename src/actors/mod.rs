// ============================================================================
// Actors Module
// ============================================================================
//
// Actor-based wrapper for callers on more than one thread. The cart actor
// owns the catalog and the aggregator together and handles one message at
// a time.
//
// Note: The cart logic itself lives in domain::cart and has no actor
//       dependency. Single-threaded callers can use OrderAggregator directly.
//
// ============================================================================

mod cart_actor;

pub use cart_actor::{
    AddItem,
    CartActor,
    CartChanged,
    ClearCart,
    GetCategories,
    GetSummary,
    ListCatalog,
    LoadCatalog,
    RemoveItem,
    Subscribe,
};
