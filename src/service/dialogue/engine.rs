use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use std::sync::Arc;
use uuid::Uuid;

use crate::service::{
    catalog::{Catalog, CatalogItem, ItemCategory},
    session::{ConversationId, Session},
};

use super::{Body, DialogueError, DialogueState, Effect, Input, KeyboardLayout, Order, Prompt, ShopInfo, Transition, Trigger};

static QUANTITY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());

/// Positive integer without sign, padding or leading zeros. Digits beyond
/// `u128` can never fit a decimal total, so they fail here.
pub fn parse_quantity(text: &str) -> Option<u128> {
    if !QUANTITY_REGEX.is_match(text) {
        return None;
    }
    text.parse().ok()
}

/// The menu state machine. Pure: it computes the next session, the effect to
/// apply and the prompt to show, and never touches a store.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    catalog: Arc<Catalog>,
    shop: ShopInfo,
}

impl DialogueEngine {
    pub fn new(catalog: Arc<Catalog>, shop: ShopInfo) -> Self {
        Self { catalog, shop }
    }

    pub fn transition(&self, session: &Session, input: &Input) -> Result<Transition, DialogueError> {
        let conversation = session.conversation;

        // honored from every state so a user can never get stuck
        match input {
            Input::Trigger(Trigger::Buy) => return Ok(self.buy_menu(conversation)),
            Input::Trigger(Trigger::MainMenu) => return Ok(self.main_menu(conversation)),
            Input::Trigger(Trigger::Support) => return Ok(self.support(conversation)),
            _ => {}
        }

        match &session.state {
            DialogueState::Idle => Ok(self.on_idle(conversation, input)),
            DialogueState::BuyMenu => Ok(self.on_buy_menu(session, input)),
            DialogueState::ServiceMenu => self.on_service_menu(session, input),
            DialogueState::AccountMenu => self.on_account_menu(session, input),
            DialogueState::AwaitingQuantity { item } => Ok(self.on_awaiting_quantity(session, item, input)),
        }
    }

    fn on_idle(&self, conversation: ConversationId, input: &Input) -> Transition {
        let idle = Session::new(conversation);
        let user = conversation.user;

        match input {
            Input::Trigger(Trigger::Profile) => Transition {
                session: idle,
                effect: Effect::ReadProfile(user),
                prompt: Prompt::new(Body::Profile { user }, KeyboardLayout::BackToMain),
            },
            Input::Trigger(Trigger::Reviews) => Self::stay(
                idle,
                Body::Reviews {
                    channel: self.shop.reviews_channel.clone(),
                },
                KeyboardLayout::BackToMain,
            ),
            _ => self.main_menu(conversation),
        }
    }

    fn on_buy_menu(&self, session: &Session, input: &Input) -> Transition {
        let conversation = session.conversation;

        match input {
            Input::Trigger(Trigger::Services) => Self::stay(
                Session::with_state(conversation, DialogueState::ServiceMenu),
                Body::ServiceList,
                KeyboardLayout::Services,
            ),
            Input::Trigger(Trigger::Accounts) => Self::stay(
                Session::with_state(conversation, DialogueState::AccountMenu),
                Body::AccountList,
                KeyboardLayout::Accounts,
            ),
            Input::Trigger(Trigger::Back) => self.main_menu(conversation),
            _ => Self::stay(session.clone(), Body::UseMenuButtons, KeyboardLayout::Keep),
        }
    }

    fn on_service_menu(&self, session: &Session, input: &Input) -> Result<Transition, DialogueError> {
        let conversation = session.conversation;

        match input {
            Input::Trigger(Trigger::Back) => Ok(self.buy_menu(conversation)),
            Input::Selection(name) => {
                let item = self.resolve(name)?;

                if item.category != ItemCategory::Service {
                    return Ok(Self::choose_from_list(session, ItemCategory::Service));
                }

                if item.is_per_unit() {
                    return Ok(Self::stay(
                        Session::with_state(conversation, DialogueState::AwaitingQuantity { item: item.clone() }),
                        Body::EnterQuantity { item: item.clone() },
                        KeyboardLayout::Cancel,
                    ));
                }

                Ok(self.complete(conversation, self.flat_order(item)))
            }
            _ => Ok(Self::choose_from_list(session, ItemCategory::Service)),
        }
    }

    fn on_account_menu(&self, session: &Session, input: &Input) -> Result<Transition, DialogueError> {
        let conversation = session.conversation;

        match input {
            Input::Trigger(Trigger::Back) => Ok(self.buy_menu(conversation)),
            Input::Selection(name) => {
                let item = self.resolve(name)?;

                if item.category != ItemCategory::Account {
                    return Ok(Self::choose_from_list(session, ItemCategory::Account));
                }

                Ok(self.complete(conversation, self.flat_order(item)))
            }
            _ => Ok(Self::choose_from_list(session, ItemCategory::Account)),
        }
    }

    fn on_awaiting_quantity(&self, session: &Session, item: &CatalogItem, input: &Input) -> Transition {
        let conversation = session.conversation;

        let quantity = match input {
            Input::Trigger(Trigger::Cancel) | Input::Trigger(Trigger::Back) => return self.buy_menu(conversation),
            Input::FreeText(text) => parse_quantity(text),
            _ => None,
        };

        let order = quantity.and_then(|quantity| self.quantity_order(item, quantity));

        match order {
            Some(order) => self.complete(conversation, order),
            None => Self::stay(session.clone(), Body::EnterNumber, KeyboardLayout::Keep),
        }
    }

    fn resolve(&self, name: &str) -> Result<&CatalogItem, DialogueError> {
        self.catalog.lookup(name).ok_or_else(|| {
            error!("Selection {:?} does not exist in the catalog", name);
            DialogueError::CatalogInconsistency(format!("unknown catalog item {:?}", name))
        })
    }

    fn flat_order(&self, item: &CatalogItem) -> Order {
        Order {
            reference: Uuid::new_v4(),
            item_name: item.name.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity: None,
            unit_label: item.unit_label.clone(),
            total: item.unit_price,
            payment_details: self.shop.payment_details.clone(),
            support_contact: self.shop.support_contact.clone(),
        }
    }

    /// `None` when the total does not fit a decimal; treated like bad input.
    fn quantity_order(&self, item: &CatalogItem, quantity: u128) -> Option<Order> {
        let total = Decimal::from_u128(quantity)?.checked_mul(item.unit_price)?.round_dp(2);

        Some(Order {
            quantity: Some(quantity),
            total,
            ..self.flat_order(item)
        })
    }

    fn complete(&self, conversation: ConversationId, order: Order) -> Transition {
        Transition {
            session: Session::new(conversation),
            effect: Effect::RecordPurchase(conversation.user),
            prompt: Prompt::new(Body::PaymentInstructions(order), KeyboardLayout::BackToMain),
        }
    }

    fn main_menu(&self, conversation: ConversationId) -> Transition {
        Self::stay(
            Session::new(conversation),
            Body::MainMenu {
                shop_name: self.shop.name.clone(),
            },
            KeyboardLayout::Main,
        )
    }

    fn support(&self, conversation: ConversationId) -> Transition {
        Self::stay(
            Session::new(conversation),
            Body::Support {
                contact: self.shop.support_contact.clone(),
            },
            KeyboardLayout::BackToMain,
        )
    }

    fn buy_menu(&self, conversation: ConversationId) -> Transition {
        Self::stay(
            Session::with_state(conversation, DialogueState::BuyMenu),
            Body::BuyMenu,
            KeyboardLayout::BuyCategories,
        )
    }

    fn choose_from_list(session: &Session, category: ItemCategory) -> Transition {
        Self::stay(session.clone(), Body::ChooseFromList(category), KeyboardLayout::Keep)
    }

    /// A transition without side effects.
    fn stay(session: Session, body: Body, keyboard: KeyboardLayout) -> Transition {
        Transition {
            session,
            effect: Effect::None,
            prompt: Prompt::new(body, keyboard),
        }
    }
}
