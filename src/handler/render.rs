use chrono::{DateTime, Utc};
use teloxide::utils::html::escape;

use crate::service::{
    catalog::{CatalogItem, ItemCategory},
    dialogue::{Body, Order},
    ledger::{LedgerService, UserRecord, UserTier},
};

const DEFAULT_UNIT_LABEL: &str = "шт.";

pub const TRANSIENT_FAILURE: &str = "⚠️ Сервис временно недоступен. Попробуйте еще раз через минуту.";

/// Renders a prompt body as Telegram HTML. `record` carries the ledger
/// snapshot for bodies that show one.
pub fn render_body(body: &Body, record: Option<&UserRecord>) -> String {
    match body {
        Body::MainMenu { shop_name } => format!(
            "🌟 <b>Добро пожаловать в {}!</b> 🌟\n\n\
             Здесь вы можете приобрести игровые ценности.\n\n\
             Выберите действие:",
            escape(shop_name)
        ),
        Body::BuyMenu => "🛒 <b>Меню покупок</b>\n\nВыберите категорию товаров:".to_string(),
        Body::ServiceList => "🎮 <b>Доступные услуги</b>\n\nВыберите нужную услугу:".to_string(),
        Body::AccountList => "👥 <b>Доступные аккаунты</b>\n\nВыберите нужный аккаунт:".to_string(),
        Body::UseMenuButtons => "Пожалуйста, используйте кнопки меню".to_string(),
        Body::ChooseFromList(ItemCategory::Service) => "Пожалуйста, выберите услугу из списка.".to_string(),
        Body::ChooseFromList(ItemCategory::Account) => "Пожалуйста, выберите аккаунт из списка.".to_string(),
        Body::EnterQuantity { item } => render_enter_quantity(item),
        Body::EnterNumber => "Пожалуйста, введите число.".to_string(),
        Body::PaymentInstructions(order) => render_order(order),
        Body::Profile { user } => match record {
            Some(record) => render_profile(record),
            None => render_profile(&UserRecord::new(*user)),
        },
        Body::Support { contact } => format!(
            "🆘 <b>Центр поддержки</b>\n\n\
             Если у вас возникли вопросы с оплатой или получением заказа, \
             напишите нам в поддержку.\n\n\
             ⏳ <b>Время ответа:</b> 5-15 минут (10:00-22:00 МСК)\n\n\
             📩 <b>Контакты:</b> {}\n\n\
             <b>Обязательно укажите:</b>\n\
             1. Скриншот оплаты\n\
             2. Ваш Telegram ID\n\
             3. Название заказанного товара",
            escape(contact)
        ),
        Body::Reviews { channel } => format!(
            "⭐ <b>Отзывы наших клиентов</b>\n\n\
             📢 Официальный канал с отзывами: {}\n\
             (Реальные скриншоты и видеоотчеты)\n\n\
             После покупки вы тоже можете оставить отзыв!",
            escape(channel)
        ),
    }
}

fn render_enter_quantity(item: &CatalogItem) -> String {
    let unit = unit_label(item.unit_label.as_deref());

    format!(
        "💵 <b>{}</b>\n\n1 {} = {}₽\n\nВведите количество, которое хотите приобрести:",
        escape(&item.name),
        escape(unit),
        item.unit_price
    )
}

fn render_order(order: &Order) -> String {
    let details = match order.quantity {
        Some(quantity) => {
            let unit = escape(unit_label(order.unit_label.as_deref()));
            format!(
                "💵 <b>Детали заказа</b>\n\n\
                 Вы заказали: {} ({} {})\n\
                 Цена за 1 {}: {}₽\n\
                 Итоговая сумма: {:.2}₽",
                escape(&order.item_name),
                quantity,
                unit,
                unit,
                order.unit_price,
                order.total
            )
        }
        None => format!(
            "✅ <b>Вы выбрали:</b> {}\n\n📝 {}\n\n💸 <b>Цена:</b> {}₽",
            escape(&order.item_name),
            escape(&order.description),
            order.total
        ),
    };

    format!(
        "{}\n\n🧾 <b>Номер заказа:</b> <code>{}</code>\n\n\
         📌 <b>Реквизиты для оплаты:</b>\n{}\n\n\
         После оплаты отправьте скриншот в этот чат.\n\
         Вопросы: {}",
        details,
        order.reference,
        escape(&order.payment_details),
        escape(&order.support_contact)
    )
}

fn render_profile(record: &UserRecord) -> String {
    format!(
        "👤 <b>Ваш профиль</b>\n\n\
         🆔 ID: <code>{}</code>\n\
         📊 Статус: {}\n\
         📦 Совершено покупок: {}\n\
         📅 Первая покупка: {}\n\
         📅 Последняя покупка: {}\n\n\
         💡 Чем больше покупок, тем выше ваш статус!",
        record.identity,
        tier_label(LedgerService::tier_of(record)),
        record.purchase_count,
        purchase_date(record.first_purchase_at),
        purchase_date(record.last_purchase_at)
    )
}

fn tier_label(tier: UserTier) -> &'static str {
    match tier {
        UserTier::New => "🥉 Новый клиент",
        UserTier::Regular => "🥈 Постоянный клиент",
        UserTier::Vip => "🥇 VIP клиент",
    }
}

fn purchase_date(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%d.%m.%Y %H:%M UTC").to_string(),
        None => "еще нет".to_string(),
    }
}

fn unit_label(label: Option<&str>) -> &str {
    label.unwrap_or(DEFAULT_UNIT_LABEL)
}
