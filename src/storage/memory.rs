use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::{hash::Hash, sync::Arc};

use super::{Store, StorageError, Upsert};

#[derive(Clone, Debug)]
pub struct MemoryStore<K: Eq + Hash, V: Clone> {
    map: Arc<DashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> MemoryStore<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            map: Arc::new(DashMap::with_capacity(capacity)),
        }
    }
}

#[async_trait]
impl<K, V> Store<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, StorageError> {
        Ok(self.map.get(key).map(|value| value.value().clone()))
    }

    async fn put(&self, key: K, value: V) -> Result<(), StorageError> {
        self.map.insert(key, value);
        Ok(())
    }

    async fn upsert(&self, key: K, f: Upsert<V>) -> Result<V, StorageError> {
        // the entry guard holds the shard lock until the new value is written
        let updated = match self.map.entry(key) {
            Entry::Occupied(mut occupied) => {
                let next = f(Some(occupied.get().clone()));
                occupied.insert(next.clone());
                next
            }
            Entry::Vacant(vacant) => {
                let next = f(None);
                vacant.insert(next.clone());
                next
            }
        };

        Ok(updated)
    }
}
