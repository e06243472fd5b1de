use crate::config::Config;
use crate::database::models::PlayerInfo;
use crate::database::store::RegistrationStore;
use crate::utils::html::escape_html;
use crate::utils::validation::parse_event_id;
use rand::seq::SliceRandom;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

/// Splits the main-list players of an event into two random teams
/// (admin only).
pub async fn handle_randomize_teams(
    bot: Bot,
    msg: Message,
    event_id_arg: String,
    store: &RegistrationStore,
    config: &Config,
) -> ResponseResult<()> {
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);

    if !config.is_admin(user_id) {
        bot.send_message(msg.chat.id, "❌ Only admins can randomize teams!")
            .await?;
        return Ok(());
    }

    let event_id = match parse_event_id(&event_id_arg) {
        Ok(id) => id,
        Err(_) => {
            bot.send_message(msg.chat.id, "❌ Usage: /randomize_teams <event_id>")
                .await?;
            return Ok(());
        }
    };

    match store.get_event(event_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            bot.send_message(msg.chat.id, "❌ Event not found!").await?;
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Failed to load event {}: {}", event_id, e);
            bot.send_message(msg.chat.id, "❌ Error loading the event.").await?;
            return Ok(());
        }
    }

    let mut players = match store.get_players_for_teams(event_id).await {
        Ok(players) => players,
        Err(e) => {
            tracing::error!("Failed to load players for event {}: {}", event_id, e);
            bot.send_message(msg.chat.id, "❌ Error loading players.").await?;
            return Ok(());
        }
    };

    if players.len() < 2 {
        bot.send_message(msg.chat.id, "❌ Need at least 2 players to create teams!")
            .await?;
        return Ok(());
    }

    players.shuffle(&mut rand::thread_rng());
    let (team1, team2) = split_teams(players);

    let mut text = format!("⚽ <b>Random Teams for Event {event_id}</b>\n\n");
    text.push_str(&format!("🔴 <b>Team 1 ({} players):</b>\n", team1.len()));
    for (i, player) in team1.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, escape_html(&player.display_name())));
    }
    text.push_str(&format!("\n🔵 <b>Team 2 ({} players):</b>\n", team2.len()));
    for (i, player) in team2.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, escape_html(&player.display_name())));
    }
    text.push_str("\nGood luck and have fun! ⚽");

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Splits an already-shuffled player list into two teams. With an odd
/// count, team 1 takes the extra player.
fn split_teams(players: Vec<PlayerInfo>) -> (Vec<PlayerInfo>, Vec<PlayerInfo>) {
    let mid = players.len() / 2;
    let mut team1: Vec<PlayerInfo> = players[..mid].to_vec();
    let mut team2: Vec<PlayerInfo> = players[mid..].to_vec();

    if players.len() % 2 == 1 {
        if let Some(extra) = team2.pop() {
            team1.push(extra);
        }
    }

    (team1, team2)
}
