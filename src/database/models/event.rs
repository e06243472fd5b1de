use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled football game.
///
/// `date` is "DD/MM/YYYY" and `time` is "HH:MM", both validated by the
/// command layer before they reach the store. Events are never deleted;
/// cancelling flips `status` to "cancelled".
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub max_players: i64,
    pub description: String,
    pub created_by: i64,
    pub created_at: String,
    pub status: String,
}

impl Event {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}
