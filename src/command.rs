use teloxide::{adaptors::Throttle, prelude::Requester, utils::command::BotCommands, Bot};

use crate::{error::BotResult, service::dialogue::Trigger};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Главное меню")]
    Start,
    #[command(description = "Поддержка")]
    Help,
    #[command(description = "Отменить текущее действие")]
    Cancel,
}

impl Command {
    /// Commands feed the same state machine as the menu buttons.
    pub fn trigger(&self) -> Trigger {
        match self {
            Command::Start | Command::Cancel => Trigger::MainMenu,
            Command::Help => Trigger::Support,
        }
    }
}

pub async fn setup_commands(bot: &Throttle<Bot>) -> BotResult<()> {
    bot.delete_my_commands().await?;
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
