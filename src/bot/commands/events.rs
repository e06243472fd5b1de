use crate::database::models::Event;
use crate::database::store::RegistrationStore;
use crate::utils::html::{escape_html, truncate};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};

pub async fn handle_events(bot: Bot, msg: Message, store: &RegistrationStore) -> ResponseResult<()> {
    let events = match store.get_active_events().await {
        Ok(events) => events,
        Err(e) => {
            tracing::error!("Failed to load active events: {}", e);
            bot.send_message(msg.chat.id, "❌ Error loading events.").await?;
            return Ok(());
        }
    };

    if events.is_empty() {
        bot.send_message(
            msg.chat.id,
            "📅 No upcoming events scheduled.\n\nAsk an admin to create one!",
        )
        .await?;
        return Ok(());
    }

    // A single event gets the full card with Join/Leave; several get a
    // compact list with Details buttons
    if let [event] = events.as_slice() {
        send_event_card(&bot, msg.chat.id, store, event.id).await?;
        return Ok(());
    }

    let text = match format_events_list(store, &events).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to format events list: {}", e);
            bot.send_message(msg.chat.id, "❌ Error loading events.").await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, text)
        .reply_markup(events_list_keyboard(&events))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Sends the detail card for one event, with Join/Leave buttons.
pub async fn send_event_card(
    bot: &Bot,
    chat_id: ChatId,
    store: &RegistrationStore,
    event_id: i64,
) -> ResponseResult<()> {
    let text = match format_event_card(store, event_id).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            bot.send_message(chat_id, "❌ Event not found!").await?;
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Failed to format event {}: {}", event_id, e);
            bot.send_message(chat_id, "❌ Error loading event.").await?;
            return Ok(());
        }
    };

    bot.send_message(chat_id, text)
        .reply_markup(event_keyboard(event_id))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Renders the full event card: date, description, main list with
/// capacity, and the reserve queue when it isn't empty.
pub async fn format_event_card(
    store: &RegistrationStore,
    event_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    let Some(event) = store.get_event(event_id).await? else {
        return Ok(None);
    };
    let registrations = store.get_event_registrations(event_id).await?;

    let mut text = format!("⚽ <b>Football Event {}</b>\n", event.id);
    text.push_str(&format!("📅 {} at {}\n", event.date, event.time));
    if !event.description.is_empty() {
        text.push_str(&format!("📝 {}\n", escape_html(&event.description)));
    }
    if !event.is_active() {
        text.push_str("🚫 <b>This event has been cancelled.</b>\n");
    }

    text.push_str(&format!(
        "\n👥 <b>Players ({}/{}):</b>\n",
        registrations.main.len(),
        event.max_players
    ));

    if registrations.main.is_empty() {
        text.push_str("<i>No players yet</i>\n");
    } else {
        for (i, player) in registrations.main.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, escape_html(&player.display_name())));
        }
    }

    if !registrations.reserve.is_empty() {
        text.push_str(&format!(
            "\n⏳ <b>Reserve List ({}):</b>\n",
            registrations.reserve.len()
        ));
        for (i, player) in registrations.reserve.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, escape_html(&player.display_name())));
        }
    }

    Ok(Some(text))
}

/// Compact list of several upcoming events with their fill levels.
async fn format_events_list(
    store: &RegistrationStore,
    events: &[Event],
) -> Result<String, sqlx::Error> {
    let mut lines = vec!["📅 <b>Upcoming Events</b>".to_string(), String::new()];
    for event in events {
        let regs = store.get_event_registrations(event.id).await?;
        lines.push(format!("#{} • {}, {}", event.id, event.date, event.time));
        if regs.reserve.is_empty() {
            lines.push(format!("👥 {}/{}", regs.main.len(), event.max_players));
        } else {
            lines.push(format!(
                "👥 {}/{} (+{})",
                regs.main.len(),
                event.max_players,
                regs.reserve.len()
            ));
        }
        if !event.description.is_empty() {
            lines.push(format!("📝 {}", escape_html(&truncate(&event.description, 100))));
        }
        lines.push(String::new());
    }
    Ok(lines.join("\n").trim_end().to_string())
}

pub fn event_keyboard(event_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("⚽ Join", format!("join_{event_id}")),
        InlineKeyboardButton::callback("❌ Leave", format!("leave_{event_id}")),
    ]])
}

/// Details buttons for the compact list, two per row.
pub fn events_list_keyboard(events: &[Event]) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    for event in events {
        row.push(InlineKeyboardButton::callback(
            format!("Details #{}", event.id),
            format!("view_{}", event.id),
        ));
        if row.len() == 2 {
            rows.push(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    InlineKeyboardMarkup::new(rows)
}
