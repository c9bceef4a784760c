use std::{collections::BTreeSet, fs};

use memkit_prefs::{Editor, InMemoryPreferences, PrefValue, Preferences, PreferencesStorage};
use memkit_store::{Config, Invalidity, Storage};
use tempfile::TempDir;

fn storage() -> (TempDir, Storage) {
    let dir = tempfile::tempdir().unwrap();
    (dir, Storage::new(Config::default().with_throw_on_invalid(false)))
}

fn settings() -> InMemoryPreferences {
    let mut preferences = InMemoryPreferences::new();
    let mut editor = Editor::new();
    editor
        .put("onboarded", true)
        .put("volume", 7)
        .put("last_sync", 1_700_000_000_000_i64)
        .put("theme", "dark")
        .put("scale", 1.5_f32);
    preferences.apply(editor).unwrap();
    preferences
}

#[test]
fn saved_preferences_restore_into_a_fresh_store() {
    let (dir, storage) = storage();
    let backup = dir.path().join("settings.json");
    let backup = backup.to_string_lossy();

    let saved = storage.save_shared_preferences(&settings(), &*backup);
    assert!(saved.is_successful(), "{}", saved.message());

    let mut fresh = InMemoryPreferences::new();
    let restored = storage.restore_shared_preferences(&*backup, &mut fresh);
    assert!(restored.is_successful(), "{}", restored.message());
    assert!(restored.message().contains("were restored"));
    assert!(restored.message().contains("theme: dark"));
    assert!(!restored.message().contains("Unparseable"));
    assert_eq!(fresh, settings());
}

#[test]
fn unknown_entries_are_skipped() {
    let (dir, storage) = storage();
    let backup = dir.path().join("settings.json");
    fs::write(
        &backup,
        r#"{
            "tags": {"string_set": ["a", "b"]},
            "avatar": {"custom": {"width": 64}}
        }"#,
    )
    .unwrap();

    let mut preferences = InMemoryPreferences::new();
    let restored =
        storage.restore_shared_preferences(&*backup.to_string_lossy(), &mut preferences);
    assert!(restored.is_successful(), "{}", restored.message());
    assert!(restored.message().contains("partially restored"));
    assert!(
        restored
            .message()
            .contains("Unparseable preferences:\navatar\n")
    );

    let tags = PrefValue::from(BTreeSet::from(["a".to_owned(), "b".to_owned()]));
    assert_eq!(preferences.get("tags"), Some(&tags));
    assert_eq!(preferences.get("avatar"), None);
    assert_eq!(restored.payload().map(|values| values.len()), Some(1));
}

#[test]
fn an_empty_backup_restores_nothing() {
    let (dir, storage) = storage();
    let backup = dir.path().join("empty.json");
    fs::write(&backup, "{}").unwrap();

    let mut preferences = settings();
    let restored =
        storage.restore_shared_preferences(&*backup.to_string_lossy(), &mut preferences);
    assert!(!restored.is_successful());
    assert!(
        restored
            .message()
            .contains("No preferences at all were restored")
    );
    assert_eq!(preferences, settings());
}

#[test]
fn a_missing_backup_is_an_invalid_origin() {
    let (dir, storage) = storage();
    let backup = dir.path().join("missing.json");

    let mut preferences = InMemoryPreferences::new();
    let restored =
        storage.restore_shared_preferences(&*backup.to_string_lossy(), &mut preferences);
    assert!(!restored.is_successful());
    assert_eq!(restored.invalidity(), Some(Invalidity::FileDoesntExist));
    assert!(restored.message().contains("restore_shared_preferences(origin, preferences)"));
    assert!(restored.message().contains("\tpreferences: preferences\n\torigin: "));
    assert!(preferences.is_empty());
}

#[test]
fn backups_report_their_own_calls() {
    let (dir, storage) = storage();

    let orphan = dir.path().join("missing/settings.json");
    let saved = storage.save_shared_preferences(&settings(), &*orphan.to_string_lossy());
    assert_eq!(saved.invalidity(), Some(Invalidity::ContainerFolderDoesntExist));
    assert!(saved.message().contains("save_shared_preferences(preferences, destination)"));

    let loaded = storage.load_shared_preferences(&*orphan.to_string_lossy());
    assert_eq!(loaded.invalidity(), Some(Invalidity::FileDoesntExist));
    assert!(loaded.message().contains("load_shared_preferences(origin)"));

    let backup = dir.path().join("settings.json");
    let saved = storage.save_shared_preferences(&settings(), &*backup.to_string_lossy());
    assert!(saved.message().starts_with("Preferences were saved to"));
}

#[test]
fn a_backup_that_is_not_a_map_cannot_be_loaded() {
    let (dir, storage) = storage();
    let backup = dir.path().join("settings.json");
    fs::write(&backup, "[1, 2, 3]").unwrap();

    let loaded = storage.load_shared_preferences(&*backup.to_string_lossy());
    assert!(!loaded.is_successful());
    assert!(loaded.message().contains("could not be read"));
}

#[test]
fn loading_returns_the_raw_entries() {
    let (dir, storage) = storage();
    let backup = dir.path().join("settings.json");
    let backup = backup.to_string_lossy();
    assert!(storage.save_shared_preferences(&settings(), &*backup).is_successful());

    let loaded = storage.load_shared_preferences(&*backup);
    assert!(loaded.is_successful(), "{}", loaded.message());
    let entries = loaded.into_payload().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries["volume"], serde_json::json!({ "int": 7 }));
}
