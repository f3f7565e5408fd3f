use serde::{Deserialize, Serialize};
use std::fmt;

use crate::service::{catalog::CatalogItem, dialogue::DialogueState, ledger::UserIdentity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatIdentity(pub i64);

/// One dialogue per (user, chat) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId {
    pub user: UserIdentity,
    pub chat: ChatIdentity,
}

impl ConversationId {
    pub fn new(user: UserIdentity, chat: ChatIdentity) -> Self {
        Self { user, chat }
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chat.0, self.user.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub conversation: ConversationId,
    pub state: DialogueState,
}

impl Session {
    pub fn new(conversation: ConversationId) -> Self {
        Self {
            conversation,
            state: DialogueState::Idle,
        }
    }

    pub fn with_state(conversation: ConversationId, state: DialogueState) -> Self {
        Self { conversation, state }
    }

    /// Set exactly while the session awaits a quantity.
    pub fn pending_item(&self) -> Option<&CatalogItem> {
        match &self.state {
            DialogueState::AwaitingQuantity { item } => Some(item),
            _ => None,
        }
    }
}
