use dayplan_core::{
    FixedClock, HourRange, MemorySlotRepository, Planner, SlotEvent, SlotState, StoreError,
    TaskStore, TemporalClass, ViewEffect,
};

fn new_planner<'r>(
    repo: &'r MemorySlotRepository,
    day: &str,
    hour: u8,
) -> Planner<&'r MemorySlotRepository, FixedClock> {
    let mut planner = Planner::new(repo, FixedClock::new(day, hour), HourRange::default());
    planner.init().unwrap();
    planner
}

#[test]
fn init_builds_rows_from_persisted_state() {
    let repo = MemorySlotRepository::new();
    {
        let mut store = TaskStore::new(&repo);
        store.save_day_marker("2024-01-01").unwrap();
        store.set_task(9, "standup").unwrap();
        store.set_task(14, "Write report").unwrap();
    }

    let planner = new_planner(&repo, "2024-01-01", 9);
    assert_eq!(planner.rows().len(), 13);

    let row = planner.row(9).unwrap();
    assert_eq!(row.state, SlotState::IdleFilled);
    assert_eq!(row.text.as_deref(), Some("standup"));
    assert_eq!(row.temporal, TemporalClass::Present);
    assert_eq!(planner.row(8).unwrap().temporal, TemporalClass::Past);
    assert_eq!(planner.row(10).unwrap().temporal, TemporalClass::Future);
}

#[test]
fn init_resets_when_the_stored_day_is_stale() {
    let repo = MemorySlotRepository::new();
    {
        let mut store = TaskStore::new(&repo);
        store.save_day_marker("2024-01-01").unwrap();
        store.set_task(9, "stale work").unwrap();
    }

    let planner = new_planner(&repo, "2024-01-02", 9);
    assert!(planner.store().is_empty());
    assert_eq!(planner.row(9).unwrap().state, SlotState::IdleEmpty);
    assert_eq!(
        planner.store().load_day_marker().as_deref(),
        Some("2024-01-02")
    );
}

#[test]
fn add_edit_save_commits_text_and_rebuilds() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);

    assert_eq!(
        planner.handle(14, SlotEvent::AddEdit).unwrap(),
        ViewEffect::RowUpdated(14)
    );
    assert_eq!(planner.row(14).unwrap().state, SlotState::Editing);

    assert_eq!(
        planner
            .handle(14, SlotEvent::Save("  Write report ".to_string()))
            .unwrap(),
        ViewEffect::Rebuilt
    );
    let row = planner.row(14).unwrap();
    assert_eq!(row.state, SlotState::IdleFilled);
    assert_eq!(row.text.as_deref(), Some("Write report"));
}

#[test]
fn empty_save_deletes_an_existing_task() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);
    planner
        .handle(14, SlotEvent::Save("Write report".to_string()))
        .unwrap();

    planner.handle(14, SlotEvent::AddEdit).unwrap();
    assert_eq!(
        planner
            .handle(14, SlotEvent::Save("   ".to_string()))
            .unwrap(),
        ViewEffect::Rebuilt
    );
    assert_eq!(planner.row(14).unwrap().state, SlotState::IdleEmpty);
    assert!(planner.store().task(14).is_none());
}

#[test]
fn toggle_updates_a_single_row_in_place() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);
    planner
        .handle(14, SlotEvent::Save("Write report".to_string()))
        .unwrap();

    assert_eq!(
        planner.handle(14, SlotEvent::ToggleComplete).unwrap(),
        ViewEffect::RowUpdated(14)
    );
    assert!(planner.row(14).unwrap().completed);
    assert_eq!(planner.row(14).unwrap().state, SlotState::IdleFilled);

    assert_eq!(
        planner.handle(14, SlotEvent::ToggleComplete).unwrap(),
        ViewEffect::RowUpdated(14)
    );
    assert!(!planner.row(14).unwrap().completed);
}

#[test]
fn delete_and_toggle_on_empty_slots_are_guarded_noops() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);

    assert_eq!(
        planner.handle(10, SlotEvent::Delete).unwrap(),
        ViewEffect::NoChange
    );
    assert_eq!(
        planner.handle(10, SlotEvent::ToggleComplete).unwrap(),
        ViewEffect::NoChange
    );
    assert!(planner.store().is_empty());
}

#[test]
fn delete_resets_the_row_including_completed_display() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);
    planner
        .handle(14, SlotEvent::Save("Write report".to_string()))
        .unwrap();
    planner.handle(14, SlotEvent::ToggleComplete).unwrap();

    assert_eq!(
        planner.handle(14, SlotEvent::Delete).unwrap(),
        ViewEffect::Rebuilt
    );
    let row = planner.row(14).unwrap();
    assert_eq!(row.state, SlotState::IdleEmpty);
    assert_eq!(row.text, None);
    assert!(!row.completed);
}

#[test]
fn gestures_outside_the_display_window_are_rejected() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);

    assert!(matches!(
        planner.handle(7, SlotEvent::AddEdit),
        Err(StoreError::HourOutOfRange(7))
    ));
    assert!(matches!(
        planner.handle(21, SlotEvent::Save("late".to_string())),
        Err(StoreError::HourOutOfRange(21))
    ));
}

#[test]
fn tick_refreshes_temporal_classes_without_touching_content() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);
    planner
        .handle(9, SlotEvent::Save("standup".to_string()))
        .unwrap();

    planner.clock().set_hour(14);
    assert_eq!(planner.tick().unwrap(), ViewEffect::Refreshed);
    assert_eq!(planner.row(9).unwrap().temporal, TemporalClass::Past);
    assert_eq!(planner.row(14).unwrap().temporal, TemporalClass::Present);
    assert_eq!(planner.row(9).unwrap().text.as_deref(), Some("standup"));
}

#[test]
fn tick_rolls_the_day_over_exactly_once() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 23);
    planner
        .handle(20, SlotEvent::Save("wrap up".to_string()))
        .unwrap();

    planner.clock().set_day("2024-01-02");
    planner.clock().set_hour(0);
    assert_eq!(planner.tick().unwrap(), ViewEffect::Rebuilt);
    assert!(planner.store().is_empty());
    assert_eq!(planner.row(20).unwrap().state, SlotState::IdleEmpty);
    assert_eq!(
        planner.store().load_day_marker().as_deref(),
        Some("2024-01-02")
    );

    assert_eq!(planner.tick().unwrap(), ViewEffect::Refreshed);
}

#[test]
fn clear_all_empties_every_slot() {
    let repo = MemorySlotRepository::new();
    let mut planner = new_planner(&repo, "2024-01-01", 9);
    planner
        .handle(9, SlotEvent::Save("standup".to_string()))
        .unwrap();
    planner
        .handle(14, SlotEvent::Save("Write report".to_string()))
        .unwrap();

    assert_eq!(planner.clear_all().unwrap(), ViewEffect::Rebuilt);
    assert!(planner.store().is_empty());
    assert!(planner
        .rows()
        .iter()
        .all(|row| row.state == SlotState::IdleEmpty));
}
