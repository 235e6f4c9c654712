use super::event::DomainEvent;

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// Key Principles:
// 1. Commands are checked against current state before anything changes
// 2. A command yields the events it caused; an empty list means no-op
// 3. State only changes by applying events
// 4. Every applied event bumps the version
//
// ============================================================================

/// Generic Aggregate trait
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
pub trait Aggregate {
    type Event: DomainEvent;
    type Command;

    /// Decide which events a command produces (business logic, no mutation)
    fn handle_command(&self, command: &Self::Command) -> Vec<Self::Event>;

    /// Apply an event to update state
    fn apply_event(&mut self, event: &Self::Event);

    /// Number of events applied so far
    fn version(&self) -> u64;

    /// Apply a sequence of events in order
    fn replay<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        for event in events {
            self.apply_event(event);
        }
    }
}
