mod error;
mod memory;

pub use error::StorageError;
pub use memory::MemoryStore;

use async_trait::async_trait;

/// Read-modify-write applied under the store's per-key exclusion.
pub type Upsert<V> = Box<dyn FnOnce(Option<V>) -> V + Send>;

/// Keyed store behind the session and ledger services.
///
/// Backends decide where values live; callers only ever replace values
/// wholesale (`put`) or through an atomic per-key `upsert`.
#[async_trait]
pub trait Store<K, V>: Send + Sync + 'static
where
    K: Send + Sync + 'static,
    V: Send + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, StorageError>;

    async fn put(&self, key: K, value: V) -> Result<(), StorageError>;

    async fn upsert(&self, key: K, f: Upsert<V>) -> Result<V, StorageError>;
}
