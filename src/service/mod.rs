pub mod catalog;
pub mod dialogue;
pub mod ledger;
pub mod session;

use std::sync::Arc;

use catalog::Catalog;
use dialogue::{DialogueEngine, DialogueService, ShopInfo};
use ledger::{LedgerService, UserIdentity, UserRecord};
use session::{ConversationId, Session, SessionService};

use crate::{storage::MemoryStore, utils::clock::Clock};

#[derive(Clone)]
pub struct ServiceRegistry {
    pub catalog: Arc<Catalog>,
    pub dialogue: DialogueService,
}

impl ServiceRegistry {
    /// Wires the services over in-memory stores.
    pub fn new(catalog: Catalog, shop: ShopInfo, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        info!("Initializing service registry");

        let catalog = Arc::new(catalog);

        let sessions = SessionService::new(Arc::new(MemoryStore::<ConversationId, Session>::new(capacity)));
        let ledger = LedgerService::new(Arc::new(MemoryStore::<UserIdentity, UserRecord>::new(capacity)), clock);
        let engine = DialogueEngine::new(Arc::clone(&catalog), shop);
        let dialogue = DialogueService::new(engine, sessions, ledger);

        info!("Service registry initialized");

        Self { catalog, dialogue }
    }
}
