use crate::service::{ledger::LedgerError, session::SessionError};

#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// A selection names an item the catalog does not hold. Always a defect.
    #[error("Catalog inconsistency: {0}")]
    CatalogInconsistency(String),
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(#[from] LedgerError),
    #[error("Session unavailable: {0}")]
    SessionUnavailable(#[from] SessionError),
}
