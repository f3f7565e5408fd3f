mod error;
mod model;

pub use error::SessionError;
pub use model::*;

use std::sync::Arc;

use crate::storage::Store;

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn Store<ConversationId, Session>>,
}

impl SessionService {
    pub fn new(store: Arc<dyn Store<ConversationId, Session>>) -> Self {
        info!("Initializing session service");
        Self { store }
    }

    /// Returns the stored session, or a fresh idle one without storing it.
    pub async fn get(&self, conversation: ConversationId) -> Result<Session, SessionError> {
        let session = self.store.get(&conversation).await?;
        Ok(session.unwrap_or_else(|| Session::new(conversation)))
    }

    pub async fn put(&self, conversation: ConversationId, session: Session) -> Result<(), SessionError> {
        self.store.put(conversation, session).await?;
        Ok(())
    }

    pub async fn clear(&self, conversation: ConversationId) -> Result<(), SessionError> {
        self.put(conversation, Session::new(conversation)).await
    }
}
