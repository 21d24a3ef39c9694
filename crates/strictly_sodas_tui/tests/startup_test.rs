//! Tests for dealing the first game from configuration.

use strictly_sodas::{GameStatus, KeyValueStore, MAX_UNLOCKED_KEY, Modal, Move};
use strictly_sodas_tui::{GameConfig, new_game, open_store};
use tempfile::NamedTempFile;

#[test]
fn test_unusable_db_path_still_deals_a_game() {
    let config = GameConfig::from_toml(
        r#"
        db_path = "/nonexistent-dir/for/sure/strictly_sodas.db"
        seed = 3
        "#,
    )
    .expect("Config should parse");

    let mut game = new_game(&config);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.difficulty(), 5);
    assert_eq!(game.modal(), Some(Modal::Instructions));

    // Moves still work against the in-memory fallback.
    game.dismiss_modal();
    let brand = game.inventory()[0];
    assert!(game.execute_move(Move::place(brand, 0)).is_applied());
}

#[test]
fn test_unusable_db_path_falls_back_to_memory() {
    let mut store = open_store("/nonexistent-dir/for/sure/strictly_sodas.db".as_ref());
    store.set(MAX_UNLOCKED_KEY, "6").expect("Memory store accepts writes");
    assert_eq!(
        store.get(MAX_UNLOCKED_KEY).expect("Query failed").as_deref(),
        Some("6")
    );
}

#[test]
fn test_configured_db_is_used() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path");
    {
        let mut store = open_store(db_file.path());
        store.set(MAX_UNLOCKED_KEY, "7").expect("Write failed");
    }

    let config = GameConfig::from_toml(&format!(
        "db_path = \"{}\"\nstarting_level = 7\nshow_instructions = false\nseed = 1",
        db_path
    ))
    .expect("Config should parse");
    let game = new_game(&config);
    assert_eq!(game.progression().max_unlocked(), 7);
    assert_eq!(game.difficulty(), 7);
    assert_eq!(game.modal(), None);
}
