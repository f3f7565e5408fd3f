use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::BotResult,
    handler::RESERVED_LABELS,
    service::{
        catalog::{Catalog, DEFAULT_CATALOG},
        ServiceRegistry,
    },
    utils::clock::SystemClock,
};

/// Shared by every handler through the dispatcher's dependency map.
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceRegistry,
}

impl AppState {
    pub fn new(config: &AppConfig) -> BotResult<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                info!("Loading catalog from {}", path.display());
                Catalog::from_file(path)?
            }
            None => {
                info!("Loading embedded catalog");
                Catalog::from_json(DEFAULT_CATALOG)?
            }
        };

        catalog.reject_reserved(&RESERVED_LABELS)?;

        info!(
            "Catalog loaded: {} services, {} accounts, quantity item {:?}",
            catalog.list_flat_services().len(),
            catalog.list_accounts().len(),
            catalog.quantity_item().name
        );

        let services = ServiceRegistry::new(
            catalog,
            config.shop.shop_info(),
            config.storage.capacity,
            Arc::new(SystemClock),
        );

        Ok(Self { services })
    }
}
