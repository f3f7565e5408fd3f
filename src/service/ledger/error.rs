use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Ledger unavailable: {0}")]
    Unavailable(#[from] StorageError),
}
