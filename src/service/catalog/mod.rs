mod error;
mod model;

pub use error::CatalogError;
pub use model::*;

use rust_decimal::Decimal;
use std::{collections::HashMap, path::Path};

pub const DEFAULT_CATALOG: &str = include_str!("../../../config/catalog.json");

/// Read-only registry of purchasable items.
///
/// Listing order is the order items were supplied in, so menus render the
/// same way on every call.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
    quantity_item: usize,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            if item.unit_price <= Decimal::ZERO {
                return Err(CatalogError::InvalidPrice(item.name.clone()));
            }
            if index.insert(item.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateItem(item.name.clone()));
            }
        }

        let per_unit: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_per_unit())
            .map(|(position, _)| position)
            .collect();

        let quantity_item = match per_unit.as_slice() {
            [position] => *position,
            other => return Err(CatalogError::QuantityItemCount(other.len())),
        };

        if items[quantity_item].category != ItemCategory::Service {
            return Err(CatalogError::QuantityItemNotService(items[quantity_item].name.clone()));
        }

        Ok(Self {
            items,
            index,
            quantity_item,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Fails if an item shares its name with a fixed button label, since the
    /// label would always win and the item could never be selected.
    pub fn reject_reserved(&self, labels: &[&str]) -> Result<(), CatalogError> {
        match self.items.iter().find(|item| labels.contains(&item.name.as_str())) {
            Some(item) => Err(CatalogError::ReservedName(item.name.clone())),
            None => Ok(()),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&CatalogItem> {
        self.index.get(name).map(|position| &self.items[*position])
    }

    pub fn list_flat_services(&self) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category == ItemCategory::Service && !item.is_per_unit())
            .collect()
    }

    pub fn list_accounts(&self) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category == ItemCategory::Account)
            .collect()
    }

    pub fn quantity_item(&self) -> &CatalogItem {
        &self.items[self.quantity_item]
    }
}
