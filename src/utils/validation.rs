use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};

pub const MIN_PLAYERS: i64 = 2;
pub const MAX_PLAYERS: i64 = 50;

/// Validates an event date in DD/MM/YYYY form.
pub fn validate_event_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y")
        .map_err(|_| anyhow!("Date must be in DD/MM/YYYY format, e.g. 25/12/2024"))?;
    Ok(())
}

/// Validates an event time in 24-hour HH:MM form.
pub fn validate_event_time(time: &str) -> Result<()> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| anyhow!("Time must be in HH:MM format, e.g. 19:00"))?;
    Ok(())
}

/// Validates the player capacity of a new event.
pub fn validate_max_players(max_players: i64) -> Result<()> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&max_players) {
        return Err(anyhow!(
            "Max players must be between {} and {}",
            MIN_PLAYERS,
            MAX_PLAYERS
        ));
    }
    Ok(())
}

/// Parses a numeric event id from a command argument.
pub fn parse_event_id(arg: &str) -> Result<i64> {
    arg.trim()
        .parse::<i64>()
        .map_err(|_| anyhow!("Event ID must be a number"))
}
