use teloxide::{adaptors::Throttle, types::Message, Bot};

use crate::{command::Command, error::HandlerResult, service::dialogue::Input, state::AppState};

use super::message::respond;

pub async fn handle_command(bot: Throttle<Bot>, msg: Message, cmd: Command, state: AppState) -> HandlerResult<()> {
    debug!("Command {:?} in chat {}", cmd, msg.chat.id);

    respond(&bot, &msg, &state, command_input(&cmd)).await
}

/// Commands feed the state machine as the matching button would.
fn command_input(cmd: &Command) -> Input {
    Input::Trigger(cmd.trigger())
}
