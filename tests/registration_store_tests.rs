use anyhow::Result;
use football_squad_bot::database::{connection::DatabaseManager, store::RegistrationStore};
use tempfile::{tempdir, TempDir};

async fn setup_test_store() -> Result<(RegistrationStore, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.init_schema().await?;

    Ok((RegistrationStore::new(db_manager.pool.clone()), temp_dir))
}

#[tokio::test]
async fn test_create_and_get_event() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    let event_id = store
        .create_event("25/12/2024", "19:00", 10, 111, "Christmas game")
        .await?;
    assert!(event_id > 0);

    let event = store.get_event(event_id).await?;
    assert!(event.is_some());
    let event = event.unwrap();
    assert_eq!(event.id, event_id);
    assert_eq!(event.date, "25/12/2024");
    assert_eq!(event.time, "19:00");
    assert_eq!(event.max_players, 10);
    assert_eq!(event.description, "Christmas game");
    assert_eq!(event.created_by, 111);
    assert_eq!(event.status, "active");
    assert!(!event.created_at.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_event_ids_are_monotonic() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    let first = store.create_event("01/06/2025", "18:00", 10, 1, "").await?;
    let second = store.create_event("02/06/2025", "18:00", 10, 1, "").await?;
    assert!(second > first);

    Ok(())
}

#[tokio::test]
async fn test_get_event_not_found() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    assert!(store.get_event(999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_get_active_events_ordering_and_filtering() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    let late = store.create_event("25/12/2024", "21:00", 10, 1, "").await?;
    let early = store.create_event("24/12/2024", "19:00", 10, 1, "").await?;
    let mid = store.create_event("25/12/2024", "09:00", 10, 1, "").await?;
    let cancelled = store.create_event("01/01/2024", "10:00", 10, 1, "").await?;
    assert!(store.cancel_event(cancelled).await?);

    let events = store.get_active_events().await?;
    let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![early, mid, late]);

    Ok(())
}

#[tokio::test]
async fn test_active_events_read_is_idempotent() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    store.create_event("25/12/2024", "19:00", 10, 1, "game").await?;

    let first: Vec<i64> = store.get_active_events().await?.iter().map(|e| e.id).collect();
    let second: Vec<i64> = store.get_active_events().await?.iter().map(|e| e.id).collect();
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_register_fills_main_then_reserve() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 2, 1, "").await?;

    assert!(store.register_user(event_id, 100, Some("alice"), Some("Alice")).await?);
    assert!(store.register_user(event_id, 200, Some("bob"), Some("Bob")).await?);
    assert!(store.register_user(event_id, 300, Some("carol"), Some("Carol")).await?);

    let regs = store.get_event_registrations(event_id).await?;
    let main_ids: Vec<i64> = regs.main.iter().map(|p| p.user_id).collect();
    let reserve_ids: Vec<i64> = regs.reserve.iter().map(|p| p.user_id).collect();
    assert_eq!(main_ids, vec![100, 200]);
    assert_eq!(reserve_ids, vec![300]);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_join_fails() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 10, 1, "").await?;

    assert!(store.register_user(event_id, 100, Some("alice"), Some("Alice")).await?);
    assert!(!store.register_user(event_id, 100, Some("alice"), Some("Alice")).await?);

    let regs = store.get_event_registrations(event_id).await?;
    assert_eq!(regs.main.len(), 1);
    assert!(regs.reserve.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_join_unknown_event_fails() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    assert!(!store.register_user(999, 100, None, None).await?);

    Ok(())
}

#[tokio::test]
async fn test_leave_promotes_earliest_reserve() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 2, 1, "").await?;

    store.register_user(event_id, 100, None, Some("Alice")).await?;
    store.register_user(event_id, 200, None, Some("Bob")).await?;
    store.register_user(event_id, 300, None, Some("Carol")).await?;
    store.register_user(event_id, 400, None, Some("Dave")).await?;

    // Alice leaves the main list; Carol (earliest reserve) takes her slot
    assert!(store.unregister_user(event_id, 100).await?);

    let regs = store.get_event_registrations(event_id).await?;
    let main_ids: Vec<i64> = regs.main.iter().map(|p| p.user_id).collect();
    let reserve_ids: Vec<i64> = regs.reserve.iter().map(|p| p.user_id).collect();
    assert_eq!(main_ids, vec![200, 300]);
    assert_eq!(reserve_ids, vec![400]);

    Ok(())
}

#[tokio::test]
async fn test_leave_main_without_reserve_shrinks_main() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 5, 1, "").await?;

    store.register_user(event_id, 100, None, Some("Alice")).await?;
    store.register_user(event_id, 200, None, Some("Bob")).await?;

    assert!(store.unregister_user(event_id, 100).await?);

    let regs = store.get_event_registrations(event_id).await?;
    let main_ids: Vec<i64> = regs.main.iter().map(|p| p.user_id).collect();
    assert_eq!(main_ids, vec![200]);
    assert!(regs.reserve.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_leave_from_reserve_does_not_promote() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 2, 1, "").await?;

    store.register_user(event_id, 100, None, Some("Alice")).await?;
    store.register_user(event_id, 200, None, Some("Bob")).await?;
    store.register_user(event_id, 300, None, Some("Carol")).await?;
    store.register_user(event_id, 400, None, Some("Dave")).await?;

    // Carol leaves the reserve list; the main list must not change
    assert!(store.unregister_user(event_id, 300).await?);

    let regs = store.get_event_registrations(event_id).await?;
    let main_ids: Vec<i64> = regs.main.iter().map(|p| p.user_id).collect();
    let reserve_ids: Vec<i64> = regs.reserve.iter().map(|p| p.user_id).collect();
    assert_eq!(main_ids, vec![100, 200]);
    assert_eq!(reserve_ids, vec![400]);

    Ok(())
}

#[tokio::test]
async fn test_leave_without_registration_fails() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 2, 1, "").await?;

    store.register_user(event_id, 100, None, Some("Alice")).await?;

    assert!(!store.unregister_user(event_id, 999).await?);
    assert!(!store.unregister_user(42, 100).await?);

    let regs = store.get_event_registrations(event_id).await?;
    assert_eq!(regs.main.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_rejoin_after_leaving_is_a_new_registration() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 2, 1, "").await?;

    store.register_user(event_id, 100, None, Some("Alice")).await?;
    store.register_user(event_id, 200, None, Some("Bob")).await?;
    assert!(store.unregister_user(event_id, 100).await?);

    // The old cancelled row must not block a fresh registration
    assert!(store.register_user(event_id, 100, None, Some("Alice")).await?);

    let regs = store.get_event_registrations(event_id).await?;
    let main_ids: Vec<i64> = regs.main.iter().map(|p| p.user_id).collect();
    // Bob kept his slot; Alice rejoined at the back of the queue
    assert_eq!(main_ids, vec![200, 100]);

    Ok(())
}

#[tokio::test]
async fn test_main_count_never_exceeds_capacity() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let max_players = 4;
    let event_id = store
        .create_event("25/12/2024", "19:00", max_players, 1, "")
        .await?;

    for user_id in 0..10 {
        store.register_user(event_id, user_id, None, None).await?;
    }

    let regs = store.get_event_registrations(event_id).await?;
    assert_eq!(regs.main.len() as i64, max_players);
    assert_eq!(regs.reserve.len(), 6);

    // Churn: a few leaves and joins, capacity must still hold
    store.unregister_user(event_id, 0).await?;
    store.unregister_user(event_id, 2).await?;
    store.register_user(event_id, 100, None, None).await?;
    store.register_user(event_id, 101, None, None).await?;

    let regs = store.get_event_registrations(event_id).await?;
    assert!(regs.main.len() as i64 <= max_players);
    assert_eq!(regs.main.len() as i64, max_players);

    Ok(())
}

#[tokio::test]
async fn test_cancel_event_semantics() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 10, 1, "").await?;
    store.register_user(event_id, 100, Some("alice"), Some("Alice")).await?;

    // Unknown id
    assert!(!store.cancel_event(999).await?);

    // First cancel succeeds, repeat reports false
    assert!(store.cancel_event(event_id).await?);
    assert!(!store.cancel_event(event_id).await?);

    // The event is still readable, just cancelled
    let event = store.get_event(event_id).await?.unwrap();
    assert_eq!(event.status, "cancelled");
    assert!(!event.is_active());

    // Registrations are untouched and still queryable
    let regs = store.get_event_registrations(event_id).await?;
    assert_eq!(regs.main.len(), 1);
    assert_eq!(regs.main[0].user_id, 100);

    Ok(())
}

#[tokio::test]
async fn test_get_user_registrations() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;

    let later = store.create_event("26/12/2024", "19:00", 2, 1, "").await?;
    let sooner = store.create_event("25/12/2024", "19:00", 1, 1, "").await?;
    let cancelled = store.create_event("27/12/2024", "19:00", 5, 1, "").await?;

    store.register_user(sooner, 500, Some("eve"), Some("Eve")).await?;
    store.register_user(sooner, 501, None, None).await?; // fills capacity 1, Eve holds it
    store.register_user(later, 500, Some("eve"), Some("Eve")).await?;
    store.register_user(cancelled, 500, Some("eve"), Some("Eve")).await?;
    store.cancel_event(cancelled).await?;

    let regs = store.get_user_registrations(500).await?;
    // Ordered by event date; the cancelled event is filtered out
    assert_eq!(regs.len(), 2);
    assert_eq!(regs[0].event_id, sooner);
    assert_eq!(regs[0].registration_type, "main");
    assert_eq!(regs[1].event_id, later);
    assert_eq!(regs[1].registration_type, "main");

    // 501 overflowed onto the reserve list of the capacity-1 event
    let other = store.get_user_registrations(501).await?;
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].registration_type, "reserve");

    Ok(())
}

#[tokio::test]
async fn test_get_players_for_teams() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 3, 1, "").await?;

    store.register_user(event_id, 100, Some("alice_fc"), Some("Alice")).await?;
    store.register_user(event_id, 200, Some("bob_fc"), None).await?;
    store.register_user(event_id, 300, None, None).await?;
    store.register_user(event_id, 400, None, Some("Reserve Ray")).await?;

    let players = store.get_players_for_teams(event_id).await?;

    // Only the three main-list players, in registration order
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].user_id, 100);
    assert_eq!(players[1].user_id, 200);
    assert_eq!(players[2].user_id, 300);

    // Display name priority: first_name, then username, then user id
    assert_eq!(players[0].display_name(), "Alice");
    assert_eq!(players[1].display_name(), "bob_fc");
    assert_eq!(players[2].display_name(), "300");

    Ok(())
}

#[tokio::test]
async fn test_promotion_cascade_preserves_queue_order() -> Result<()> {
    let (store, _temp_dir) = setup_test_store().await?;
    let event_id = store.create_event("25/12/2024", "19:00", 2, 1, "").await?;

    for user_id in [1, 2, 3, 4, 5] {
        store.register_user(event_id, user_id, None, None).await?;
    }

    // Main drains one by one; reserves promote strictly in queue order
    store.unregister_user(event_id, 1).await?;
    store.unregister_user(event_id, 2).await?;

    let regs = store.get_event_registrations(event_id).await?;
    let main_ids: Vec<i64> = regs.main.iter().map(|p| p.user_id).collect();
    let reserve_ids: Vec<i64> = regs.reserve.iter().map(|p| p.user_id).collect();
    assert_eq!(main_ids, vec![3, 4]);
    assert_eq!(reserve_ids, vec![5]);

    Ok(())
}
