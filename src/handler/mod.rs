mod command;
mod input;
mod keyboard;
mod message;
mod render;

pub use keyboard::RESERVED_LABELS;

use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    dptree,
    types::Update,
};

use crate::command::Command;

pub fn get_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command::handle_command),
        )
        .branch(Update::filter_message().endpoint(message::handle_message))
}
