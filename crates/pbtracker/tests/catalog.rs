//! End-to-end catalog workflows against an in-memory store.

use chrono::{TimeZone, Utc};
use pbtracker::config::StatsConfig;
use pbtracker::reminder::{default_lead_time, upcoming_reminders};
use pbtracker::{
    export_data, import_data, Category, CategoryUpdate, Game, GameUpdate, RecordStore, Section,
    Settings, Stats, Storage,
};

fn seeded() -> (Storage, i64) {
    let storage = Storage::open_in_memory().unwrap();
    let mut game = Game::new("Super Mario 64", Section::FullRuns);
    game.tags = vec!["n64".to_string()];
    let id = storage.add_game(game).unwrap();

    let mut any = Category::new("16 Star", 4, "15:40");
    any.time_to_beat = "16:00".to_string();
    any.next_run_eligible = Some("2030-01-10".to_string());
    storage.add_category(id, any).unwrap();
    storage
        .add_category(id, Category::new("70 Star", 1, "47:10"))
        .unwrap();

    (storage, id)
}

#[test]
fn categories_get_derived_fields_on_add() {
    let (storage, id) = seeded();
    let game = storage.get_game(id).unwrap().unwrap();

    let sixteen = game.category(1).unwrap();
    assert_eq!(sixteen.next_person_to_beat, "3rd place");
    assert_eq!(sixteen.time_difference, "00:20");

    let seventy = game.category(2).unwrap();
    assert_eq!(seventy.next_person_to_beat, "World Record");
    assert!(seventy.time_difference.is_empty());
}

#[test]
fn new_pb_keeps_history_and_refreshes_gap() {
    let (storage, id) = seeded();
    let update = CategoryUpdate {
        pb_time: Some("16:30".to_string()),
        placement: Some(3),
        ..CategoryUpdate::default()
    };
    let category = storage.update_category(id, 1, update).unwrap();

    assert_eq!(category.previous_times, vec!["15:40".to_string()]);
    assert_eq!(category.next_person_to_beat, "2nd place");
    assert_eq!(category.time_difference, "Already ahead!");
}

#[test]
fn missing_records_are_not_found() {
    let (storage, id) = seeded();

    let err = storage
        .update_game(id + 100, GameUpdate::default())
        .unwrap_err();
    assert!(err.is_not_found());

    let err = storage
        .update_category(id, 99, CategoryUpdate::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn export_import_moves_catalog_between_stores() {
    let (mut source, _) = seeded();
    source
        .save_settings(&Settings {
            dark_mode: true,
            tag_presets: vec!["n64".to_string()],
            ..Settings::default()
        })
        .unwrap();
    let json = export_data(&source).unwrap();

    let mut target = Storage::open_in_memory().unwrap();
    target.add_game(Game::new("Old", Section::TrollRuns)).unwrap();
    let summary = import_data(&mut target, &json).unwrap();

    assert_eq!(summary.games_imported, Some(1));
    assert!(summary.settings_imported);

    let games = target.games().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].title, "Super Mario 64");
    let ids: Vec<u32> = games[0].categories.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(target.settings().unwrap().dark_mode);
}

#[test]
fn invalid_import_leaves_store_untouched() {
    let (mut storage, _) = seeded();
    let result = import_data(&mut storage, r#"{"games":[{"title":"","section":"ILs"}]}"#);

    assert!(result.unwrap_err().is_validation_error());
    assert_eq!(storage.games().unwrap().len(), 1);
}

#[test]
fn stats_and_reminders_read_the_store() {
    let (storage, _) = seeded();
    let games = storage.games().unwrap();
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let stats = Stats::compute(&games, now, &StatsConfig::default());
    assert_eq!(stats.total_games, 1);
    assert_eq!(stats.total_categories, 2);
    assert_eq!(stats.first_places, 1);
    assert_eq!(stats.next_eligible.len(), 1);

    let reminders = upcoming_reminders(&games, now, default_lead_time());
    assert_eq!(reminders.len(), 1);
    assert_eq!(
        reminders[0].at,
        Utc.with_ymd_and_hms(2030, 1, 9, 0, 0, 0).unwrap()
    );
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = std::env::temp_dir().join(format!("pbtracker_it_{}", std::process::id()));
    let path = dir.join("nested").join("records.db");

    {
        let storage = Storage::open(&path).unwrap();
        storage
            .add_game(Game::new("Celeste", Section::IndividualLevels))
            .unwrap();
    }

    let storage = Storage::open(&path).unwrap();
    let games = storage.games().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].section, Section::IndividualLevels);

    drop(storage);
    let _ = std::fs::remove_dir_all(&dir);
}
