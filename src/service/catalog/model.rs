use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A single fixed total price.
    FlatPrice,
    /// Priced per unit; the customer supplies a quantity.
    PerUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Service,
    Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique; doubles as the menu button label.
    pub name: String,
    pub unit_price: Decimal,
    pub kind: ItemKind,
    pub category: ItemCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_label: Option<String>,
}

impl CatalogItem {
    pub fn is_per_unit(&self) -> bool {
        self.kind == ItemKind::PerUnit
    }
}
