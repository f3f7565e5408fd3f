mod engine;
mod error;
mod model;

pub use engine::DialogueEngine;
pub use error::DialogueError;
pub use model::*;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::service::{
    ledger::{LedgerError, LedgerService, UserRecord},
    session::{ConversationId, SessionService},
};

/// Inbound text already resolved into a typed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub conversation: ConversationId,
    pub input: Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub prompt: Prompt,
    /// The ledger record touched by the transition, if any.
    pub record: Option<UserRecord>,
}

/// Runs one transition per inbound message and applies its effects.
///
/// Transitions on the same conversation are serialized; the session write and
/// the ledger write either both land or the session is rolled back.
#[derive(Clone)]
pub struct DialogueService {
    engine: Arc<DialogueEngine>,
    sessions: SessionService,
    ledger: LedgerService,
    locks: Arc<DashMap<ConversationId, Arc<Mutex<()>>>>,
}

impl DialogueService {
    pub fn new(engine: DialogueEngine, sessions: SessionService, ledger: LedgerService) -> Self {
        info!("Initializing dialogue service");
        Self {
            engine: Arc::new(engine),
            sessions,
            ledger,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub async fn handle(&self, event: InboundEvent) -> Result<Reply, DialogueError> {
        let conversation = event.conversation;
        let lock = self.conversation_lock(conversation);
        let _guard = lock.lock().await;

        let previous = self.sessions.get(conversation).await?;
        let transition = self.engine.transition(&previous, &event.input)?;

        debug!(
            "Conversation {}: {:?} -> {:?}",
            conversation, previous.state, transition.session.state
        );

        if let Some(item) = transition.session.pending_item() {
            debug!("Conversation {} awaiting quantity for {:?}", conversation, item.name);
        }

        if transition.session.state == DialogueState::Idle {
            self.sessions.clear(conversation).await?;
        } else {
            self.sessions.put(conversation, transition.session).await?;
        }

        let record = match self.apply_effect(&transition.effect).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Rolling back conversation {} after ledger failure: {}", conversation, e);
                if let Err(rollback) = self.sessions.put(conversation, previous).await {
                    error!("Failed to roll back conversation {}: {}", conversation, rollback);
                }
                return Err(DialogueError::LedgerUnavailable(e));
            }
        };

        if let Body::PaymentInstructions(order) = &transition.prompt.body {
            info!(
                "Order {} placed by user {}: {} x{} = {}",
                order.reference,
                conversation.user,
                order.item_name,
                order.quantity.unwrap_or(1),
                order.total
            );
        }

        Ok(Reply {
            prompt: transition.prompt,
            record,
        })
    }

    async fn apply_effect(&self, effect: &Effect) -> Result<Option<UserRecord>, LedgerError> {
        match effect {
            Effect::None => Ok(None),
            Effect::RecordPurchase(user) => self.ledger.record_purchase(*user).await.map(Some),
            Effect::ReadProfile(user) => self.ledger.get_or_create(*user).await.map(Some),
        }
    }

    fn conversation_lock(&self, conversation: ConversationId) -> Arc<Mutex<()>> {
        self.locks
            .entry(conversation)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::engine::tests::test_shop;
    use super::*;
    use crate::{
        service::{
            catalog::tests::test_catalog,
            ledger::UserIdentity,
            session::{ChatIdentity, Session},
        },
        storage::{MemoryStore, StorageError, Store, Upsert},
        utils::clock::{Clock, ManualClock},
    };
    use async_trait::async_trait;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    struct UnavailableLedgerStore;

    #[async_trait]
    impl Store<UserIdentity, UserRecord> for UnavailableLedgerStore {
        async fn get(&self, _key: &UserIdentity) -> Result<Option<UserRecord>, StorageError> {
            Err(StorageError::Unavailable("ledger offline".to_string()))
        }

        async fn put(&self, _key: UserIdentity, _value: UserRecord) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("ledger offline".to_string()))
        }

        async fn upsert(&self, _key: UserIdentity, _f: Upsert<UserRecord>) -> Result<UserRecord, StorageError> {
            Err(StorageError::Unavailable("ledger offline".to_string()))
        }
    }

    struct Harness {
        dialogue: DialogueService,
        sessions: SessionService,
        ledger: LedgerService,
        clock: Arc<ManualClock>,
    }

    fn harness_with_ledger_store(store: Arc<dyn Store<UserIdentity, UserRecord>>) -> Harness {
        let clock = Arc::new(ManualClock::new());
        let sessions = SessionService::new(Arc::new(MemoryStore::<ConversationId, Session>::new(8)));
        let ledger = LedgerService::new(store, clock.clone());
        let engine = DialogueEngine::new(Arc::new(test_catalog()), test_shop());

        Harness {
            dialogue: DialogueService::new(engine, sessions.clone(), ledger.clone()),
            sessions,
            ledger,
            clock,
        }
    }

    fn harness() -> Harness {
        harness_with_ledger_store(Arc::new(MemoryStore::<UserIdentity, UserRecord>::new(8)))
    }

    fn conversation() -> ConversationId {
        ConversationId::new(UserIdentity(77), ChatIdentity(770))
    }

    async fn send(harness: &Harness, input: Input) -> Result<Reply, DialogueError> {
        harness
            .dialogue
            .handle(InboundEvent {
                conversation: conversation(),
                input,
            })
            .await
    }

    async fn state(harness: &Harness) -> DialogueState {
        harness.sessions.get(conversation()).await.unwrap().state
    }

    async fn purchases(harness: &Harness) -> u32 {
        harness.ledger.get_or_create(UserIdentity(77)).await.unwrap().purchase_count
    }

    #[tokio::test]
    async fn test_quantity_order_scenario() {
        let harness = harness();

        send(&harness, Input::Trigger(Trigger::Buy)).await.unwrap();
        assert_eq!(state(&harness).await, DialogueState::BuyMenu);

        send(&harness, Input::Trigger(Trigger::Services)).await.unwrap();
        assert_eq!(state(&harness).await, DialogueState::ServiceMenu);

        send(&harness, Input::Selection("Bond farming".to_string())).await.unwrap();
        let item = test_catalog().quantity_item().clone();
        assert_eq!(state(&harness).await, DialogueState::AwaitingQuantity { item });

        let reply = send(&harness, Input::FreeText("7".to_string())).await.unwrap();
        assert_eq!(state(&harness).await, DialogueState::Idle);
        assert_eq!(purchases(&harness).await, 1);
        assert_eq!(reply.record.map(|r| r.purchase_count), Some(1));

        match reply.prompt.body {
            Body::PaymentInstructions(order) => assert_eq!(order.total, dec!(7) * dec!(0.20)),
            other => panic!("expected payment instructions, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_quantity_changes_nothing() {
        let harness = harness();
        send(&harness, Input::Trigger(Trigger::Buy)).await.unwrap();
        send(&harness, Input::Trigger(Trigger::Services)).await.unwrap();
        send(&harness, Input::Selection("Bond farming".to_string())).await.unwrap();
        let before = harness.sessions.get(conversation()).await.unwrap();

        let reply = send(&harness, Input::FreeText("abc".to_string())).await.unwrap();

        assert_eq!(reply.prompt.body, Body::EnterNumber);
        assert_eq!(reply.record, None);
        assert_eq!(harness.sessions.get(conversation()).await.unwrap(), before);
        assert_eq!(purchases(&harness).await, 0);
    }

    #[tokio::test]
    async fn test_flat_service_order_scenario() {
        let harness = harness();
        harness
            .sessions
            .put(conversation(), Session::with_state(conversation(), DialogueState::ServiceMenu))
            .await
            .unwrap();

        let reply = send(&harness, Input::Selection("80km run".to_string())).await.unwrap();

        assert_eq!(state(&harness).await, DialogueState::Idle);
        assert_eq!(purchases(&harness).await, 1);
        match reply.prompt.body {
            Body::PaymentInstructions(order) => assert_eq!(order.total, dec!(40)),
            other => panic!("expected payment instructions, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_back_from_accounts_records_nothing() {
        let harness = harness();
        harness
            .sessions
            .put(conversation(), Session::with_state(conversation(), DialogueState::AccountMenu))
            .await
            .unwrap();

        send(&harness, Input::Trigger(Trigger::Back)).await.unwrap();

        assert_eq!(state(&harness).await, DialogueState::BuyMenu);
        assert_eq!(purchases(&harness).await, 0);
    }

    #[tokio::test]
    async fn test_purchase_history_tracks_first_and_last() {
        let harness = harness();
        let first_at = harness.clock.now();
        let mut last_at = first_at;

        for _ in 0..4 {
            last_at = harness.clock.now();
            send(&harness, Input::Trigger(Trigger::Buy)).await.unwrap();
            send(&harness, Input::Trigger(Trigger::Accounts)).await.unwrap();
            send(&harness, Input::Selection("Full account".to_string())).await.unwrap();
            // navigation and cancellation never count
            send(&harness, Input::Trigger(Trigger::Buy)).await.unwrap();
            send(&harness, Input::Trigger(Trigger::MainMenu)).await.unwrap();
            harness.clock.advance(Duration::hours(1));
        }

        let record = harness.ledger.get_or_create(UserIdentity(77)).await.unwrap();
        assert_eq!(record.purchase_count, 4);
        assert_eq!(record.first_purchase_at, Some(first_at));
        assert_eq!(record.last_purchase_at, Some(last_at));
    }

    #[tokio::test]
    async fn test_profile_reads_ledger() {
        let harness = harness();

        let reply = send(&harness, Input::Trigger(Trigger::Profile)).await.unwrap();

        assert_eq!(reply.prompt.body, Body::Profile { user: UserIdentity(77) });
        assert_eq!(reply.record, Some(UserRecord::new(UserIdentity(77))));
        assert_eq!(state(&harness).await, DialogueState::Idle);
    }

    #[tokio::test]
    async fn test_ledger_failure_rolls_back_session() {
        let harness = harness_with_ledger_store(Arc::new(UnavailableLedgerStore));
        harness
            .sessions
            .put(conversation(), Session::with_state(conversation(), DialogueState::ServiceMenu))
            .await
            .unwrap();

        let result = send(&harness, Input::Selection("All trains".to_string())).await;

        assert!(matches!(result, Err(DialogueError::LedgerUnavailable(_))));
        assert_eq!(state(&harness).await, DialogueState::ServiceMenu);
    }

    #[tokio::test]
    async fn test_catalog_inconsistency_leaves_session_untouched() {
        let harness = harness();
        harness
            .sessions
            .put(conversation(), Session::with_state(conversation(), DialogueState::AccountMenu))
            .await
            .unwrap();

        let result = send(&harness, Input::Selection("Ghost item".to_string())).await;

        assert!(matches!(result, Err(DialogueError::CatalogInconsistency(_))));
        assert_eq!(state(&harness).await, DialogueState::AccountMenu);
        assert_eq!(purchases(&harness).await, 0);
    }

    #[tokio::test]
    async fn test_two_chats_of_one_user_share_the_ledger() {
        let harness = harness();
        let chats = [ChatIdentity(1), ChatIdentity(2), ChatIdentity(3)];

        let mut handles = Vec::new();
        for chat in chats {
            let dialogue = harness.dialogue.clone();
            handles.push(tokio::spawn(async move {
                let conversation = ConversationId::new(UserIdentity(77), chat);
                for input in [
                    Input::Trigger(Trigger::Buy),
                    Input::Trigger(Trigger::Services),
                    Input::Selection("All trains".to_string()),
                ] {
                    dialogue.handle(InboundEvent { conversation, input }).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(purchases(&harness).await, 3);
    }

    #[tokio::test]
    async fn test_concurrent_messages_in_one_conversation_are_serialized() {
        let harness = harness();
        harness
            .sessions
            .put(conversation(), Session::with_state(conversation(), DialogueState::ServiceMenu))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let dialogue = harness.dialogue.clone();
            handles.push(tokio::spawn(async move {
                dialogue
                    .handle(InboundEvent {
                        conversation: conversation(),
                        input: Input::Selection("All trains".to_string()),
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut completed = 0;
        for handle in handles {
            if matches!(handle.await.unwrap().prompt.body, Body::PaymentInstructions(_)) {
                completed += 1;
            }
        }

        // only the first message sees the service menu; the rest land in Idle
        assert_eq!(completed, 1);
        assert_eq!(purchases(&harness).await, 1);
    }
}
