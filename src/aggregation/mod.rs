// ============================================================================
// Aggregation Core - Generic Abstractions
// ============================================================================
//
// Reusable command/event plumbing with no domain-specific code:
// - Aggregate trait (command -> events -> state)
// - DomainEvent trait
// - ChangeNotifier (observer list fired per applied event)
//
// ============================================================================

pub mod aggregate;
pub mod event;
pub mod notifier;

// Re-export core types for convenience
pub use aggregate::Aggregate;
pub use event::DomainEvent;
pub use notifier::{ChangeNotifier, SubscriptionId};
