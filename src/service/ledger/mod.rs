mod error;
mod model;

pub use error::LedgerError;
pub use model::*;

use std::sync::Arc;

use crate::{storage::Store, utils::clock::Clock};

/// Cumulative purchase statistics per user.
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn Store<UserIdentity, UserRecord>>,
    clock: Arc<dyn Clock>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn Store<UserIdentity, UserRecord>>, clock: Arc<dyn Clock>) -> Self {
        info!("Initializing ledger service");
        Self { store, clock }
    }

    pub async fn get_or_create(&self, identity: UserIdentity) -> Result<UserRecord, LedgerError> {
        let record = self
            .store
            .upsert(
                identity,
                Box::new(move |current| current.unwrap_or_else(|| UserRecord::new(identity))),
            )
            .await?;

        Ok(record)
    }

    /// Atomic per identity: concurrent calls never lose an increment. The
    /// timestamp is read under the store's per-key exclusion so commits and
    /// timestamps share one order.
    pub async fn record_purchase(&self, identity: UserIdentity) -> Result<UserRecord, LedgerError> {
        let clock = Arc::clone(&self.clock);

        let record = self
            .store
            .upsert(
                identity,
                Box::new(move |current| {
                    current
                        .unwrap_or_else(|| UserRecord::new(identity))
                        .with_purchase_at(clock.now())
                }),
            )
            .await?;

        debug!("User {} now has {} purchases", identity, record.purchase_count);

        Ok(record)
    }

    pub fn tier_of(record: &UserRecord) -> UserTier {
        record.tier()
    }
}
