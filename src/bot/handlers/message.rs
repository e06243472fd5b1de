use crate::bot::commands::Command;
use crate::config::Config;
use crate::database::store::RegistrationStore;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: RegistrationStore,
    config: Arc<Config>,
) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Start => {
            let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
            let role = if config.is_admin(user_id) {
                "🔧 Admin"
            } else {
                "⚽ Player"
            };
            bot.send_message(
                msg.chat.id,
                format!(
                    "⚽ Welcome to Football Squad Bot!\n\
                     Status: {role}\n\n\
                     I help organize your football games.\n\n\
                     /events - Show upcoming events\n\
                     /my_status - Check your registrations\n\
                     /join <event_id> - Join by ID\n\
                     /leave <event_id> - Leave by ID\n\
                     /help - Show all commands"
                ),
            )
            .await?;
        }
        Command::Events => {
            crate::bot::commands::events::handle_events(bot, msg, &store).await?;
        }
        Command::MyStatus => {
            crate::bot::commands::status::handle_my_status(bot, msg, &store).await?;
        }
        Command::Join { event_id } => {
            crate::bot::commands::membership::handle_join(bot, msg, event_id, &store).await?;
        }
        Command::Leave { event_id } => {
            crate::bot::commands::membership::handle_leave(bot, msg, event_id, &store).await?;
        }
        Command::CreateEvent { args } => {
            crate::bot::commands::event_management::handle_create_event(
                bot, msg, args, &store, &config,
            )
            .await?;
        }
        Command::CancelEvent { event_id } => {
            crate::bot::commands::event_management::handle_cancel_event(
                bot, msg, event_id, &store, &config,
            )
            .await?;
        }
        Command::RandomizeTeams { event_id } => {
            crate::bot::commands::teams::handle_randomize_teams(bot, msg, event_id, &store, &config)
                .await?;
        }
    }
    Ok(())
}
