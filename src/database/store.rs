//! The registration store: event storage plus the join/leave/promotion
//! state machine.
//!
//! Every mutating operation runs inside a single transaction so the
//! capacity check and the insert (or the cancel and the promotion) can't
//! interleave with another writer on the same event. Business-rule
//! failures (already joined, not registered, unknown event) come back as
//! `Ok(false)`, never as errors.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::database::models::{Event, EventRegistrations, PlayerInfo, Registration, UserRegistration};

#[derive(Clone)]
pub struct RegistrationStore {
    pool: SqlitePool,
}

impl RegistrationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new event and returns its id.
    ///
    /// Inputs are validated by the command layer; the store only persists.
    pub async fn create_event(
        &self,
        date: &str,
        time: &str,
        max_players: i64,
        created_by: i64,
        description: &str,
    ) -> Result<i64, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO events (date, time, max_players, description, created_by, created_at, status)
            VALUES (?, ?, ?, ?, ?, ?, 'active')
            "#,
        )
        .bind(date)
        .bind(time)
        .bind(max_players)
        .bind(description)
        .bind(created_by)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let event_id = result.last_insert_rowid();
        info!(
            "Created event {} on {} {} (max {} players) by {}",
            event_id, date, time, max_players, created_by
        );
        Ok(event_id)
    }

    /// All active events, soonest first (dates sort by their string form).
    pub async fn get_active_events(&self) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, date, time, max_players, description, created_by, created_at, status
            FROM events
            WHERE status = 'active'
            ORDER BY date, time
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Point lookup regardless of status, so callers can tell "not found"
    /// from "cancelled".
    pub async fn get_event(&self, event_id: i64) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, date, time, max_players, description, created_by, created_at, status
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Registers a user for an event. Returns `false` if they already hold
    /// an active registration or the event doesn't exist.
    ///
    /// The new registration lands on the main list while fewer than
    /// `max_players` active main registrations exist, otherwise on the
    /// reserve list. Check and insert share one transaction, and the
    /// partial unique index turns a lost race into `false` rather than an
    /// overflow or a duplicate.
    pub async fn register_user(
        &self,
        event_id: i64,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let already_registered: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT id FROM registrations
            WHERE event_id = ? AND user_id = ? AND status = 'active'
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut tx)
        .await?;

        if already_registered.is_some() {
            debug!("User {} already registered for event {}", user_id, event_id);
            return Ok(false);
        }

        let max_players: Option<(i64,)> =
            sqlx::query_as("SELECT max_players FROM events WHERE id = ?")
                .bind(event_id)
                .fetch_optional(&mut tx)
                .await?;

        let Some((max_players,)) = max_players else {
            debug!("Join attempt for unknown event {}", event_id);
            return Ok(false);
        };

        let (main_count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM registrations
            WHERE event_id = ? AND registration_type = 'main' AND status = 'active'
            "#,
        )
        .bind(event_id)
        .fetch_one(&mut tx)
        .await?;

        let registration_type = if main_count < max_players {
            "main"
        } else {
            "reserve"
        };

        let now = Utc::now().to_rfc3339();
        let inserted = sqlx::query(
            r#"
            INSERT INTO registrations
                (event_id, user_id, username, first_name, registration_type, registered_at, status)
            VALUES (?, ?, ?, ?, ?, ?, 'active')
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(username)
        .bind(first_name)
        .bind(registration_type)
        .bind(now)
        .execute(&mut tx)
        .await;

        match inserted {
            Ok(_) => {
                tx.commit().await?;
                info!(
                    "User {} joined event {} as {}",
                    user_id, event_id, registration_type
                );
                Ok(true)
            }
            // Concurrent join slipped in between our check and insert
            Err(e) if is_unique_violation(&e) => {
                debug!("Duplicate join race for user {} on event {}", user_id, event_id);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Cancels a user's active registration. Returns `false` if they have
    /// none for this event.
    ///
    /// When a main-list registration is cancelled, the longest-waiting
    /// active reserve registration (if any) is promoted to main in the
    /// same transaction. This is the only place a registration changes
    /// type after insertion.
    pub async fn unregister_user(&self, event_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let registration: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT registration_type FROM registrations
            WHERE event_id = ? AND user_id = ? AND status = 'active'
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut tx)
        .await?;

        let Some((registration_type,)) = registration else {
            debug!("Leave attempt without registration: user {} event {}", user_id, event_id);
            return Ok(false);
        };

        sqlx::query(
            r#"
            UPDATE registrations
            SET status = 'cancelled'
            WHERE event_id = ? AND user_id = ? AND status = 'active'
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&mut tx)
        .await?;

        if registration_type == "main" {
            // Promote the earliest reserve, if there is one
            let promoted = sqlx::query(
                r#"
                UPDATE registrations
                SET registration_type = 'main'
                WHERE id = (
                    SELECT id FROM registrations
                    WHERE event_id = ? AND registration_type = 'reserve' AND status = 'active'
                    ORDER BY registered_at, id
                    LIMIT 1
                )
                "#,
            )
            .bind(event_id)
            .execute(&mut tx)
            .await?;

            if promoted.rows_affected() > 0 {
                info!("Promoted a reserve to main for event {}", event_id);
            }
        }

        tx.commit().await?;
        info!("User {} left event {} ({})", user_id, event_id, registration_type);
        Ok(true)
    }

    /// Active registrations for an event, split into main and reserve
    /// lists, each ordered by registration time.
    pub async fn get_event_registrations(
        &self,
        event_id: i64,
    ) -> Result<EventRegistrations, sqlx::Error> {
        let rows = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, event_id, user_id, username, first_name,
                   registration_type, registered_at, status
            FROM registrations
            WHERE event_id = ? AND status = 'active'
            ORDER BY registered_at, id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = EventRegistrations::default();
        for row in rows {
            if row.registration_type == "reserve" {
                result.reserve.push(PlayerInfo::from(row));
            } else {
                result.main.push(PlayerInfo::from(row));
            }
        }
        Ok(result)
    }

    /// A user's active registrations on still-active events, ordered by
    /// event date and time.
    pub async fn get_user_registrations(
        &self,
        user_id: i64,
    ) -> Result<Vec<UserRegistration>, sqlx::Error> {
        sqlx::query_as::<_, UserRegistration>(
            r#"
            SELECT e.id AS event_id, e.date, e.time, r.registration_type
            FROM events e
            JOIN registrations r ON e.id = r.event_id
            WHERE r.user_id = ? AND r.status = 'active' AND e.status = 'active'
            ORDER BY e.date, e.time
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Marks an event cancelled. Returns `false` for an unknown id or an
    /// event that is already cancelled. Registrations are left untouched.
    pub async fn cancel_event(&self, event_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET status = 'cancelled'
            WHERE id = ? AND status = 'active'
            "#,
        )
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        let cancelled = result.rows_affected() > 0;
        if cancelled {
            info!("Cancelled event {}", event_id);
        }
        Ok(cancelled)
    }

    /// The main-list players for an event in registration order, ready for
    /// team assignment.
    pub async fn get_players_for_teams(
        &self,
        event_id: i64,
    ) -> Result<Vec<PlayerInfo>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, event_id, user_id, username, first_name,
                   registration_type, registered_at, status
            FROM registrations
            WHERE event_id = ? AND registration_type = 'main' AND status = 'active'
            ORDER BY registered_at, id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PlayerInfo::from).collect())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.message().contains("UNIQUE constraint failed"))
        .unwrap_or(false)
}
