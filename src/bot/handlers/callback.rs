use crate::bot::commands::events::send_event_card;
use crate::database::store::RegistrationStore;
use teloxide::prelude::*;

/// Handles inline button presses: `view_<id>`, `join_<id>`, `leave_<id>`.
///
/// Updated event cards are sent as new messages rather than edits, so the
/// list a button came from stays intact.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    store: RegistrationStore,
) -> ResponseResult<()> {
    let user = &q.from;
    let user_id = user.id.0 as i64;

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id)
            .text("Invalid callback data format")
            .await?;
        return Ok(());
    };

    tracing::info!(
        "Callback received: '{}' from user {} ({})",
        data,
        user.username.as_deref().unwrap_or("unknown"),
        user_id
    );

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat.id) else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    if let Some(event_id) = parse_callback(&data, "view_") {
        bot.answer_callback_query(q.id).await?;
        match store.get_event(event_id).await {
            Ok(Some(_)) => {
                send_event_card(&bot, chat_id, &store, event_id).await?;
            }
            Ok(None) => {
                bot.send_message(chat_id, "❌ This event is no longer available.")
                    .await?;
            }
            Err(e) => {
                tracing::error!("Failed to load event {}: {}", event_id, e);
                bot.send_message(chat_id, "❌ Error loading the event.").await?;
            }
        }
        return Ok(());
    }

    if let Some(event_id) = parse_callback(&data, "join_") {
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
                bot.answer_callback_query(q.id).text("Error joining the event").await?;
                return Ok(());
            }
        };

        if joined {
            bot.answer_callback_query(q.id).await?;
            send_event_card(&bot, chat_id, &store, event_id).await?;
        } else {
            bot.answer_callback_query(q.id)
                .text("❌ You're already registered for this event!")
                .show_alert(true)
                .await?;
        }
        return Ok(());
    }

    if let Some(event_id) = parse_callback(&data, "leave_") {
        let left = match store.unregister_user(event_id, user_id).await {
            Ok(left) => left,
            Err(e) => {
                tracing::error!("Failed to unregister user {} from event {}: {}", user_id, event_id, e);
                bot.answer_callback_query(q.id).text("Error leaving the event").await?;
                return Ok(());
            }
        };

        if left {
            bot.answer_callback_query(q.id).await?;
            send_event_card(&bot, chat_id, &store, event_id).await?;
        } else {
            bot.answer_callback_query(q.id)
                .text("❌ You're not registered for this event!")
                .show_alert(true)
                .await?;
        }
        return Ok(());
    }

    bot.answer_callback_query(q.id)
        .text("Unknown action")
        .await?;
    Ok(())
}

fn parse_callback(data: &str, prefix: &str) -> Option<i64> {
    data.strip_prefix(prefix)?.parse().ok()
}
