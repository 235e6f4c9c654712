use std::path::PathBuf;

use super::value_objects::ItemId;

// ============================================================================
// Catalog Load Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate catalog item id: {0}")]
    DuplicateId(ItemId),

    #[error("Catalog item {0} has an empty name")]
    EmptyName(ItemId),

    #[error("Catalog item {id} has an invalid price: {price}")]
    InvalidPrice { id: ItemId, price: f64 },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
