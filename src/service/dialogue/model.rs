use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::{
    catalog::{CatalogItem, ItemCategory},
    ledger::UserIdentity,
    session::Session,
};

/// Menu level of a conversation. `AwaitingQuantity` owns the pending item,
/// so no other state can carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueState {
    #[default]
    Idle,
    BuyMenu,
    ServiceMenu,
    AccountMenu,
    AwaitingQuantity {
        item: CatalogItem,
    },
}

/// Canonical intents resolved from button labels and commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Buy,
    Services,
    Accounts,
    Back,
    Cancel,
    MainMenu,
    Profile,
    Support,
    Reviews,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Trigger(Trigger),
    /// Exact name of a catalog item.
    Selection(String),
    FreeText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    RecordPurchase(UserIdentity),
    ReadProfile(UserIdentity),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopInfo {
    pub name: String,
    pub payment_details: String,
    pub support_contact: String,
    pub reviews_channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub reference: Uuid,
    pub item_name: String,
    pub description: String,
    pub unit_price: Decimal,
    /// Present only for per-unit items.
    pub quantity: Option<u128>,
    pub unit_label: Option<String>,
    pub total: Decimal,
    pub payment_details: String,
    pub support_contact: String,
}

/// Body template tag plus the parameters the adapter needs to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    MainMenu { shop_name: String },
    BuyMenu,
    ServiceList,
    AccountList,
    UseMenuButtons,
    ChooseFromList(ItemCategory),
    EnterQuantity { item: CatalogItem },
    EnterNumber,
    PaymentInstructions(Order),
    Profile { user: UserIdentity },
    Support { contact: String },
    Reviews { channel: String },
}

/// Which fixed button set accompanies a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardLayout {
    Main,
    BuyCategories,
    Services,
    Accounts,
    Cancel,
    BackToMain,
    /// Leave the keyboard the client already shows.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub body: Body,
    pub keyboard: KeyboardLayout,
}

impl Prompt {
    pub fn new(body: Body, keyboard: KeyboardLayout) -> Self {
        Self { body, keyboard }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effect: Effect,
    pub prompt: Prompt,
}
