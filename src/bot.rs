use teloxide::adaptors::throttle::Limits;
use teloxide::adaptors::Throttle;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::Bot;

use crate::command;
use crate::config::AppConfig;
use crate::error::BotResult;
use crate::handler::get_handler;
use crate::state::AppState;
use crate::utils::http;

pub struct BotService {
    pub bot: Throttle<Bot>,
    state: AppState,
}

impl BotService {
    pub fn new(config: &AppConfig, state: AppState) -> BotResult<Self> {
        let client = http::create_telegram_client()?;

        let bot = Bot::with_client(config.telegram.0.clone(), client).throttle(Limits::default());

        info!("Bot instance created");

        Ok(Self { bot, state })
    }

    pub async fn start(&self) -> BotResult<()> {
        info!("Testing connection to Telegram API...");
        match self.bot.get_me().await {
            Ok(me) => info!("Successfully connected to Telegram API as @{}", me.username()),
            Err(e) => {
                error!("Failed to connect to Telegram API: {:?}", e);
                return Err(e.into());
            }
        }

        let bot = self.bot.clone();

        command::setup_commands(&bot).await?;

        Dispatcher::builder(bot, get_handler())
            .dependencies(dptree::deps![self.state.clone()])
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
