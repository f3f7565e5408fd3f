use crate::service::{
    catalog::Catalog,
    dialogue::{Input, Trigger},
};

use super::keyboard;

/// Maps raw message text onto a dialogue input. Labels match exactly;
/// anything that is neither a button nor a catalog item is free text.
pub fn resolve_input(text: &str, catalog: &Catalog) -> Input {
    let trigger = match text {
        keyboard::BUY => Some(Trigger::Buy),
        keyboard::SERVICES => Some(Trigger::Services),
        keyboard::ACCOUNTS => Some(Trigger::Accounts),
        keyboard::BACK => Some(Trigger::Back),
        keyboard::CANCEL => Some(Trigger::Cancel),
        keyboard::MAIN_MENU => Some(Trigger::MainMenu),
        keyboard::PROFILE => Some(Trigger::Profile),
        keyboard::SUPPORT => Some(Trigger::Support),
        keyboard::REVIEWS => Some(Trigger::Reviews),
        _ => None,
    };

    match trigger {
        Some(trigger) => Input::Trigger(trigger),
        None if catalog.lookup(text).is_some() => Input::Selection(text.to_string()),
        None => Input::FreeText(text.to_string()),
    }
}
