use teloxide::RequestError;

use crate::{
    config::ConfigError,
    runtime::RuntimeError,
    service::{catalog::CatalogError, dialogue::DialogueError},
};

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("Dialogue error: {0}")]
    DialogueError(#[from] DialogueError),

    #[error("Runtime error: {0}")]
    RuntimeError(#[from] RuntimeError),

    #[error("Telegram request error: {0}")]
    RequestError(#[from] RequestError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

pub type HandlerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn startup(step: u8) -> BotResult<()> {
        match step {
            0 => Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN").into()),
            1 => Err(CatalogError::DuplicateItem("Full account".to_string()).into()),
            _ => Err(RuntimeError::Serve(std::io::Error::other("closed")).into()),
        }
    }

    #[test]
    fn test_startup_errors_keep_their_layer() {
        assert!(matches!(
            startup(0),
            Err(BotError::ConfigError(ConfigError::Missing("TELEGRAM_BOT_TOKEN")))
        ));
        assert!(matches!(startup(1), Err(BotError::CatalogError(CatalogError::DuplicateItem(_)))));
        assert!(matches!(startup(2), Err(BotError::RuntimeError(RuntimeError::Serve(_)))));
    }

    #[test]
    fn test_messages_name_the_layer() {
        let error = BotError::from(ConfigError::Missing("PAYMENT_DETAILS"));

        assert_eq!(error.to_string(), "Config error: Missing PAYMENT_DETAILS");
    }
}
