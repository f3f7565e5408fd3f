use teloxide::{
    adaptors::Throttle,
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{KeyboardMarkup, Message, ParseMode},
    Bot,
};

use crate::{
    error::{BotError, HandlerResult},
    service::{
        catalog::Catalog,
        dialogue::{DialogueError, InboundEvent, Input, Reply},
        ledger::UserIdentity,
        session::{ChatIdentity, ConversationId},
    },
    state::AppState,
};

use super::{input::resolve_input, keyboard::keyboard_for, render};

/// What the chat receives for one dialogue step.
#[derive(Debug)]
pub(super) enum Outgoing {
    Reply {
        text: String,
        keyboard: Option<KeyboardMarkup>,
    },
    TransientFailure,
}

pub async fn handle_message(bot: Throttle<Bot>, msg: Message, state: AppState) -> HandlerResult<()> {
    let Some(input) = text_input(msg.text(), &state.services.catalog) else {
        debug!("Ignoring non-text message in chat {}", msg.chat.id);
        return Ok(());
    };

    respond(&bot, &msg, &state, input).await
}

/// Payment screenshots and stickers carry no menu input.
pub(super) fn text_input(text: Option<&str>, catalog: &Catalog) -> Option<Input> {
    text.map(|text| resolve_input(text, catalog))
}

/// Runs one dialogue step for the sender of `msg` and sends the reply.
pub(super) async fn respond(bot: &Throttle<Bot>, msg: &Message, state: &AppState, input: Input) -> HandlerResult<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!("Ignoring message without sender in chat {}", msg.chat.id);
        return Ok(());
    };

    let conversation = ConversationId::new(UserIdentity(user.id.0), ChatIdentity(msg.chat.id.0));
    let result = state.services.dialogue.handle(InboundEvent { conversation, input }).await;

    let outgoing = match outgoing(conversation, result, &state.services.catalog) {
        Ok(outgoing) => outgoing,
        Err(e) => return Err(BotError::from(e).into()),
    };

    match outgoing {
        Outgoing::Reply { text, keyboard } => {
            let mut request = bot.send_message(msg.chat.id, text).parse_mode(ParseMode::Html);
            if let Some(keyboard) = keyboard {
                request = request.reply_markup(keyboard);
            }
            request.await?;
        }
        Outgoing::TransientFailure => {
            bot.send_message(msg.chat.id, render::TRANSIENT_FAILURE).await?;
        }
    }

    Ok(())
}

/// Store faults become a retry hint for the user; a catalog inconsistency is
/// a defect and goes to the dispatcher without any reply.
pub(super) fn outgoing(
    conversation: ConversationId,
    result: Result<Reply, DialogueError>,
    catalog: &Catalog,
) -> Result<Outgoing, DialogueError> {
    match result {
        Ok(reply) => Ok(Outgoing::Reply {
            text: render::render_body(&reply.prompt.body, reply.record.as_ref()),
            keyboard: keyboard_for(reply.prompt.keyboard, catalog),
        }),
        Err(e @ (DialogueError::LedgerUnavailable(_) | DialogueError::SessionUnavailable(_))) => {
            warn!("Dialogue step failed in conversation {}: {}", conversation, e);
            Ok(Outgoing::TransientFailure)
        }
        Err(e @ DialogueError::CatalogInconsistency(_)) => {
            error!("Catalog inconsistency in conversation {}: {}", conversation, e);
            Err(e)
        }
    }
}
