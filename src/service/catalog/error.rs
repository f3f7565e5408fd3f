#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate catalog item: {0}")]
    DuplicateItem(String),
    #[error("Catalog item {0} must have a positive price")]
    InvalidPrice(String),
    #[error("Catalog must contain exactly one per-unit item, found {0}")]
    QuantityItemCount(usize),
    #[error("Per-unit item {0} must be listed under services")]
    QuantityItemNotService(String),
    #[error("Catalog item name {0} is reserved for a menu button")]
    ReservedName(String),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}
