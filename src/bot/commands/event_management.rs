use crate::bot::commands::events::send_event_card;
use crate::config::Config;
use crate::database::store::RegistrationStore;
use crate::utils::validation::{
    parse_event_id, validate_event_date, validate_event_time, validate_max_players,
};
use teloxide::prelude::*;

const CREATE_USAGE: &str = "❌ Usage: /create_event DD/MM/YYYY HH:MM max_players [description]\n\n\
    Examples:\n\
    /create_event 25/12/2024 19:00 10 Christmas game\n\
    /create_event 01/01/2025 15:00 8";

/// Creates a new event (admin only): date, time, capacity, and an
/// optional free-text description.
pub async fn handle_create_event(
    bot: Bot,
    msg: Message,
    args: String,
    store: &RegistrationStore,
    config: &Config,
) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);

    if !config.is_admin(user_id) {
        bot.send_message(msg.chat.id, "❌ Only admins can create events!")
            .await?;
        return Ok(());
    }

    let parts: Vec<&str> = args.split_whitespace().collect();
    let [date, time, max_players_arg, description @ ..] = parts.as_slice() else {
        bot.send_message(msg.chat.id, CREATE_USAGE).await?;
        return Ok(());
    };

    if let Err(e) = validate_event_date(date) {
        bot.send_message(msg.chat.id, format!("❌ {e}")).await?;
        return Ok(());
    }
    if let Err(e) = validate_event_time(time) {
        bot.send_message(msg.chat.id, format!("❌ {e}")).await?;
        return Ok(());
    }
    let max_players: i64 = match max_players_arg.parse() {
        Ok(n) => n,
        Err(_) => {
            bot.send_message(msg.chat.id, CREATE_USAGE).await?;
            return Ok(());
        }
    };
    if let Err(e) = validate_max_players(max_players) {
        bot.send_message(msg.chat.id, format!("❌ {e}")).await?;
        return Ok(());
    }

    let description = description.join(" ");

    let event_id = match store
        .create_event(date, time, max_players, user_id, &description)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create event: {}", e);
            bot.send_message(msg.chat.id, "❌ Error creating the event.")
                .await?;
            return Ok(());
        }
    };

    send_event_card(&bot, msg.chat.id, store, event_id).await?;
    Ok(())
}

/// Cancels an event (admin only). Registrations stay queryable; the event
/// just stops showing up as upcoming.
pub async fn handle_cancel_event(
    bot: Bot,
    msg: Message,
    event_id_arg: String,
    store: &RegistrationStore,
    config: &Config,
) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);

    if !config.is_admin(user_id) {
        bot.send_message(msg.chat.id, "❌ Only admins can cancel events!")
            .await?;
        return Ok(());
    }

    let event_id = match parse_event_id(&event_id_arg) {
        Ok(id) => id,
        Err(_) => {
            bot.send_message(msg.chat.id, "❌ Usage: /cancel_event <event_id>")
                .await?;
            return Ok(());
        }
    };

    let cancelled = match store.cancel_event(event_id).await {
        Ok(cancelled) => cancelled,
        Err(e) => {
            tracing::error!("Failed to cancel event {}: {}", event_id, e);
            bot.send_message(msg.chat.id, "❌ Error cancelling the event.")
                .await?;
            return Ok(());
        }
    };

    if cancelled {
        bot.send_message(msg.chat.id, format!("✅ Event {event_id} cancelled."))
            .await?;
    } else {
        bot.send_message(msg.chat.id, "❌ Event not found or already cancelled!")
            .await?;
    }
    Ok(())
}
