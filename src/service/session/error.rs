use crate::storage::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Session store error: {0}")]
    Store(#[from] StorageError),
}
