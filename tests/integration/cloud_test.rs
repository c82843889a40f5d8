//! Integration tests for cloud deck storage

use prepdeck::cloud::backends::DirectoryStore;
use prepdeck::cloud::{deck_path, CloudError, DeckRepository, ObjectStore};

use crate::helpers::{sample_record, TestEnv};

fn directory_env() -> TestEnv {
    let env = TestEnv::new();
    env.write_config("[cloud]\nbackend = \"directory\"\n");
    env
}

#[test]
fn unconfigured_backend_is_reported() {
    let env = TestEnv::new();
    env.write_record(&sample_record());

    let (_stdout, stderr, exit_code) = env.run(&["cloud", "save"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Cloud storage is not configured"));
    assert_eq!(env.read_record().deck_id, "");
}

#[test]
fn save_list_load_delete_with_directory_backend() {
    let env = directory_env();
    env.write_record(&sample_record());

    let (stdout, _stderr, exit_code) = env.run(&["cloud", "save"]);
    assert_eq!(exit_code, 0, "{stdout}");
    let id = env.read_record().deck_id;
    assert_eq!(id.len(), 36);
    assert!(stdout.contains(&id));
    assert!(env
        .home
        .path()
        .join("data")
        .join("cloud")
        .join("slidesStorage")
        .join("decks")
        .join(&id)
        .join("deck.json")
        .exists());

    let (stdout, _stderr, exit_code) = env.run(&["cloud", "list"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains(&id));
    assert!(stdout.contains("1 deck(s)"));

    // Overwrite locally, then restore from the cloud
    env.run(&["set", "point", "Local change"]);
    let (stdout, _stderr, exit_code) = env.run(&["cloud", "load", &id]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Ship weekly"));
    let record = env.read_record();
    assert_eq!(record.point, "Ship weekly");
    assert_eq!(record.deck_id, id);

    let (_stdout, _stderr, exit_code) = env.run(&["cloud", "delete", &id]);
    assert_eq!(exit_code, 0);
    assert_eq!(env.read_record().deck_id, "");
    let (stdout, _, _) = env.run(&["cloud", "list"]);
    assert!(stdout.contains("No decks"));
}

#[test]
fn second_save_reuses_the_deck() {
    let env = directory_env();
    env.write_record(&sample_record());

    env.run(&["cloud", "save"]);
    let id = env.read_record().deck_id;
    env.run(&["set", "summary", "Updated"]);
    env.run(&["cloud", "save"]);

    assert_eq!(env.read_record().deck_id, id);
    let (stdout, _, _) = env.run(&["cloud", "list"]);
    assert!(stdout.contains("1 deck(s)"));
}

#[test]
fn loading_unknown_deck_fails_cleanly() {
    let env = directory_env();
    let (_stdout, stderr, exit_code) = env.run(&["cloud", "load", "missing-deck"]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Not found in cloud storage"));
}

#[test]
fn invalid_deck_id_is_rejected() {
    let env = directory_env();
    let (_stdout, stderr, exit_code) = env.run(&["cloud", "delete", "../escape"]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("invalid deck id"));
}

#[test]
fn custom_directory_and_bucket() {
    let env = TestEnv::new();
    let root = env.path("shared");
    env.write_config(&format!(
        "[cloud]\nbackend = \"directory\"\ndirectory = {:?}\nbucket = \"team\"\n",
        root.to_str().unwrap()
    ));
    env.write_record(&sample_record());

    let (_stdout, _stderr, exit_code) = env.run(&["cloud", "save"]);
    assert_eq!(exit_code, 0);
    let id = env.read_record().deck_id;
    assert!(root.join("team").join(deck_path(&id)).exists());
}

#[test]
fn repository_reports_corrupt_deck() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = DirectoryStore::new(dir.path());
    store
        .put(&deck_path("broken"), b"[1, 2]", "application/json")
        .unwrap();
    let repo = DeckRepository::new(Box::new(store));

    let err = repo.load_record("broken").unwrap_err();
    assert!(matches!(err, CloudError::InvalidDeck { ref id, .. } if id == "broken"));
    assert!(err.to_string().contains("not a valid deck"));
}
