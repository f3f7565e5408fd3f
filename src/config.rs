use std::{fmt, path::PathBuf, str::FromStr};
use url::Url;

use crate::service::dialogue::ShopInfo;

const DEFAULT_SHOP_NAME: &str = "🚂 Balon Rails Shop";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_KEEP_ALIVE_INTERVAL_SECS: u64 = 300;
const DEFAULT_STORE_CAPACITY: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Invalid {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub shop: ShopConfig,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub keep_alive: Option<KeepAliveConfig>,
}

#[derive(Clone)]
pub struct TelegramConfig(pub String);

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TelegramConfig(***)")
    }
}

#[derive(Clone, Debug)]
pub struct ShopConfig {
    pub name: String,
    pub support_contact: String,
    pub reviews_channel: String,
    pub payment_details: String,
}

impl ShopConfig {
    pub fn shop_info(&self) -> ShopInfo {
        ShopInfo {
            name: self.name.clone(),
            payment_details: self.payment_details.clone(),
            support_contact: self.support_contact.clone(),
            reviews_channel: self.reviews_channel.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Falls back to the catalog embedded in the binary.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub capacity: usize,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct KeepAliveConfig {
    pub url: Url,
    pub interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        build_config(|key| std::env::var(key).ok())
    }
}

pub fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    info!("Building AppConfig...");

    let keep_alive = match optional(&lookup, "KEEP_ALIVE_URL") {
        Some(url) => Some(KeepAliveConfig {
            url: Url::parse(&url).map_err(|e| ConfigError::Invalid("KEEP_ALIVE_URL", e.to_string()))?,
            interval_secs: parsed(&lookup, "KEEP_ALIVE_INTERVAL_SECS", DEFAULT_KEEP_ALIVE_INTERVAL_SECS)?,
        }),
        None => None,
    };

    let config = AppConfig {
        telegram: TelegramConfig(required(&lookup, "TELEGRAM_BOT_TOKEN")?),
        shop: ShopConfig {
            name: optional(&lookup, "SHOP_NAME").unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()),
            support_contact: required(&lookup, "SUPPORT_CONTACT")?,
            reviews_channel: required(&lookup, "REVIEWS_CHANNEL")?,
            payment_details: required(&lookup, "PAYMENT_DETAILS")?,
        },
        catalog: CatalogConfig {
            path: optional(&lookup, "CATALOG_PATH").map(PathBuf::from),
        },
        storage: StorageConfig {
            capacity: parsed(&lookup, "STORE_CAPACITY", DEFAULT_STORE_CAPACITY)?,
        },
        server: ServerConfig {
            port: parsed(&lookup, "PORT", DEFAULT_PORT)?,
        },
        keep_alive,
    };

    if config.keep_alive.as_ref().is_some_and(|k| k.interval_secs == 0) {
        return Err(ConfigError::Invalid("KEEP_ALIVE_INTERVAL_SECS", "must be positive".to_string()));
    }

    info!("AppConfig built");

    Ok(config)
}

/// Blank values count as unset.
fn optional<F>(lookup: &F, key: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional(lookup, key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid(key, format!("{}: {}", value, e))),
        None => Ok(default),
    }
}
