// ============================================================================
// Domain Event Trait
// ============================================================================

/// Implemented by every event an aggregate can emit.
pub trait DomainEvent: Clone + std::fmt::Debug {
    /// Stable name used in logs and metric labels
    fn event_type(&self) -> &'static str;
}
