pub mod event_management;
pub mod events;
pub mod membership;
pub mod status;
pub mod teams;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Football Squad Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show upcoming events")]
    Events,
    #[command(description = "Check your registrations")]
    MyStatus,
    #[command(description = "Join an event: /join <event_id>")]
    Join { event_id: String },
    #[command(description = "Leave an event: /leave <event_id>")]
    Leave { event_id: String },
    #[command(
        description = "Create a game (admin): /create_event DD/MM/YYYY HH:MM max_players [description]"
    )]
    CreateEvent { args: String },
    #[command(description = "Cancel an event (admin): /cancel_event <event_id>")]
    CancelEvent { event_id: String },
    #[command(description = "Create random teams (admin): /randomize_teams <event_id>")]
    RandomizeTeams { event_id: String },
}
