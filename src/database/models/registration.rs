use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A player's registration for an event.
///
/// `registration_type` is "main" or "reserve", decided when the row is
/// inserted. The only later change is the reserve-to-main promotion when a
/// main-list player leaves. Leaving sets `status` to "cancelled"; the row
/// is kept and a later re-join inserts a fresh one.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub registration_type: String,
    pub registered_at: String,
    pub status: String,
}

/// Display info for one registered player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub registered_at: String,
}

impl PlayerInfo {
    /// First name, else username, else the numeric user id.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

impl From<Registration> for PlayerInfo {
    fn from(reg: Registration) -> Self {
        PlayerInfo {
            user_id: reg.user_id,
            username: reg.username,
            first_name: reg.first_name,
            registered_at: reg.registered_at,
        }
    }
}

/// Active registrations for one event, split by list.
#[derive(Debug, Clone, Default)]
pub struct EventRegistrations {
    pub main: Vec<PlayerInfo>,
    pub reserve: Vec<PlayerInfo>,
}

/// One row of a player's own registration overview.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRegistration {
    pub event_id: i64,
    pub date: String,
    pub time: String,
    pub registration_type: String,
}
