use crate::database::store::RegistrationStore;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

/// Shows the calling user's active registrations across active events.
pub async fn handle_my_status(
    bot: Bot,
    msg: Message,
    store: &RegistrationStore,
) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let registrations = match store.get_user_registrations(user_id).await {
        Ok(regs) => regs,
        Err(e) => {
            tracing::error!("Failed to load registrations for user {}: {}", user_id, e);
            bot.send_message(msg.chat.id, "❌ Error loading your registrations.")
                .await?;
            return Ok(());
        }
    };

    if registrations.is_empty() {
        bot.send_message(msg.chat.id, "📊 You're not registered for any events yet.")
            .await?;
        return Ok(());
    }

    let mut text = String::from("📊 <b>Your Registrations:</b>\n\n");
    for reg in &registrations {
        let (emoji, list) = if reg.registration_type == "main" {
            ("✅", "Main List")
        } else {
            ("⏳", "Reserve List")
        };
        text.push_str(&format!("{} <b>Event {}</b>\n", emoji, reg.event_id));
        text.push_str(&format!("📅 {} at {}\n", reg.date, reg.time));
        text.push_str(&format!("📍 Status: {list}\n\n"));
    }

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
