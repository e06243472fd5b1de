use crate::bot::commands::events::send_event_card;
use crate::database::store::RegistrationStore;
use crate::utils::validation::parse_event_id;
use teloxide::prelude::*;

/// Power-user join by id: /join <event_id>
pub async fn handle_join(
    bot: Bot,
    msg: Message,
    event_id_arg: String,
    store: &RegistrationStore,
) -> ResponseResult<()> {
    let event_id = match parse_event_id(&event_id_arg) {
        Ok(id) => id,
        Err(_) => {
            bot.send_message(msg.chat.id, "❌ Usage: /join <event_id>").await?;
            return Ok(());
        }
    };

    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let joined = match store
        .register_user(
            event_id,
            user_id,
            user.username.as_deref(),
            Some(user.first_name.as_str()),
        )
        .await
    {
        Ok(joined) => joined,
        Err(e) => {
            tracing::error!("Failed to register user {} for event {}: {}", user_id, event_id, e);
            bot.send_message(msg.chat.id, "❌ Error joining the event.").await?;
            return Ok(());
        }
    };

    if joined {
        bot.send_message(msg.chat.id, format!("✅ Joined event {event_id}."))
            .await?;
        send_event_card(&bot, msg.chat.id, store, event_id).await?;
    } else {
        bot.send_message(
            msg.chat.id,
            "❌ You're already registered for this event or the event is unavailable.",
        )
        .await?;
    }
    Ok(())
}

/// Power-user leave by id: /leave <event_id>
pub async fn handle_leave(
    bot: Bot,
    msg: Message,
    event_id_arg: String,
    store: &RegistrationStore,
) -> ResponseResult<()> {
    let event_id = match parse_event_id(&event_id_arg) {
        Ok(id) => id,
        Err(_) => {
            bot.send_message(msg.chat.id, "❌ Usage: /leave <event_id>").await?;
            return Ok(());
        }
    };

    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let left = match store.unregister_user(event_id, user_id).await {
        Ok(left) => left,
        Err(e) => {
            tracing::error!("Failed to unregister user {} from event {}: {}", user_id, event_id, e);
            bot.send_message(msg.chat.id, "❌ Error leaving the event.").await?;
            return Ok(());
        }
    };

    if left {
        bot.send_message(msg.chat.id, format!("✅ Left event {event_id}."))
            .await?;
        send_event_card(&bot, msg.chat.id, store, event_id).await?;
    } else {
        bot.send_message(
            msg.chat.id,
            "❌ You're not registered for this event or the event is unavailable.",
        )
        .await?;
    }
    Ok(())
}
