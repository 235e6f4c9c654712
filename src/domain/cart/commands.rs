use crate::domain::catalog::ItemId;

// ============================================================================
// Cart Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartCommand {
    /// One more unit of an item
    Add(ItemId),
    /// One unit fewer; the entry disappears at zero
    Remove(ItemId),
    Clear,
}

impl CartCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add(_) => "add",
            CartCommand::Remove(_) => "remove",
            CartCommand::Clear => "clear",
        }
    }
}
