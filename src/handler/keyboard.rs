use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::service::{catalog::Catalog, dialogue::KeyboardLayout};

pub const BUY: &str = "🛒 Купить";
pub const REVIEWS: &str = "⭐ Отзывы";
pub const SUPPORT: &str = "🆘 Поддержка";
pub const PROFILE: &str = "👤 Мой профиль";
pub const SERVICES: &str = "🎮 Услуги";
pub const ACCOUNTS: &str = "👥 Аккаунты";
pub const BACK: &str = "🔙 Назад";
pub const CANCEL: &str = "❌ Отмена";
pub const MAIN_MENU: &str = "🔙 В главное меню";

/// Labels that resolve to triggers; catalog items may not reuse them.
pub const RESERVED_LABELS: [&str; 9] = [BUY, REVIEWS, SUPPORT, PROFILE, SERVICES, ACCOUNTS, BACK, CANCEL, MAIN_MENU];

/// `None` means the client keeps whatever keyboard it already shows.
pub fn keyboard_for(layout: KeyboardLayout, catalog: &Catalog) -> Option<KeyboardMarkup> {
    let rows = match layout {
        KeyboardLayout::Main => vec![vec![BUY, REVIEWS], vec![SUPPORT, PROFILE]],
        KeyboardLayout::BuyCategories => vec![vec![SERVICES, ACCOUNTS], vec![BACK]],
        KeyboardLayout::Services => {
            let mut rows: Vec<Vec<&str>> = catalog
                .list_flat_services()
                .into_iter()
                .map(|item| vec![item.name.as_str()])
                .collect();
            rows.push(vec![catalog.quantity_item().name.as_str()]);
            rows.push(vec![BACK]);
            rows
        }
        KeyboardLayout::Accounts => {
            let mut rows: Vec<Vec<&str>> = catalog
                .list_accounts()
                .into_iter()
                .map(|item| vec![item.name.as_str()])
                .collect();
            rows.push(vec![BACK]);
            rows
        }
        KeyboardLayout::Cancel => vec![vec![CANCEL]],
        KeyboardLayout::BackToMain => vec![vec![MAIN_MENU]],
        KeyboardLayout::Keep => return None,
    };

    Some(build_keyboard(rows))
}

fn build_keyboard(rows: Vec<Vec<&str>>) -> KeyboardMarkup {
    let buttons = rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    KeyboardMarkup::new(buttons).resize_keyboard()
}
