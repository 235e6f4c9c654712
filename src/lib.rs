// ============================================================================
// order_cart - Catalog and order aggregation engine
// ============================================================================
//
// Layout:
// - domain/       Catalog and OrderAggregator (the core)
// - aggregation/  Generic command/event/observer plumbing
// - actors/       Actor wrapper for multi-threaded callers
// - metrics/      Prometheus metrics
// - config, telemetry
//
// ============================================================================

pub mod actors;
pub mod aggregation;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod telemetry;

pub use domain::cart::{CartCommand, CartEvent, CartSummary, LineItem, OrderAggregator};
pub use domain::catalog::{default_items, Catalog, CatalogError, CatalogItem, ItemId};
