//! Integration tests for export and import

use std::fs;

use serde_json::Value;

use prepdeck::deck::exchange::{import_str, ExportDocument};
use prepdeck::deck::{PrepRecord, SectionKey};

use crate::helpers::{sample_record, write_file, TestEnv};

#[test]
fn export_then_import_restores_record() {
    let env = TestEnv::new();
    let mut record = sample_record();
    record.durations.set(SectionKey::Example, 40);
    env.write_record(&record);

    let backup = env.path("backup.json");
    let (stdout, _stderr, exit_code) = env.run(&["export", backup.to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Exported to"));

    env.run(&["set", "point", "Something else"]);
    let (stdout, _stderr, exit_code) = env.run(&["import", backup.to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Imported \"Ship weekly\""));
    assert_eq!(env.read_record(), record);
}

#[test]
fn export_document_shape() {
    let env = TestEnv::new();
    env.write_record(&sample_record());

    let backup = env.path("backup.json");
    env.run(&["export", backup.to_str().unwrap()]);

    let value: Value = serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["appName"], "prepdeck");
    assert!(value["createdAt"].as_str().unwrap().contains('T'));
    assert_eq!(value["prepData"]["point"], "Ship weekly");
    assert_eq!(value["sections"].as_array().unwrap().len(), 4);
    assert_eq!(value["sections"][2]["link"], "https://example.com/report");
}

#[test]
fn export_into_directory_uses_dated_name() {
    let env = TestEnv::new();
    env.write_record(&sample_record());
    let out = env.path("exports");
    fs::create_dir_all(&out).unwrap();

    let (_stdout, _stderr, exit_code) =
        env.run(&["export", out.to_str().unwrap(), "--with-title"]);
    assert_eq!(exit_code, 0);

    let names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("ship-weekly-prep-slides-"));
    assert!(names[0].ends_with(".json"));
}

#[test]
fn export_does_not_overwrite_without_force() {
    let env = TestEnv::new();
    env.write_record(&sample_record());
    let backup = env.path("backup.json");
    write_file(&backup, "keep");

    let (_stdout, stderr, exit_code) = env.run(&["export", backup.to_str().unwrap()]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("--force"));
    assert_eq!(fs::read_to_string(&backup).unwrap(), "keep");

    let (_stdout, _stderr, exit_code) = env.run(&["export", backup.to_str().unwrap(), "--force"]);
    assert_eq!(exit_code, 0);
    assert_ne!(fs::read_to_string(&backup).unwrap(), "keep");
}

#[test]
fn import_sections_only_document() {
    let env = TestEnv::new();
    let file = env.path("partial.json");
    write_file(&file, r#"{"sections":[{"key":"point","text":"X"}]}"#);

    let (_stdout, _stderr, exit_code) = env.run(&["import", file.to_str().unwrap()]);
    assert_eq!(exit_code, 0);

    let record = env.read_record();
    assert_eq!(record.point, "X");
    assert_eq!(record.reason, "");
    assert_eq!(record.durations.total(), 60);
}

#[test]
fn import_rejects_malformed_file_and_keeps_record() {
    let env = TestEnv::new();
    env.write_record(&sample_record());
    let file = env.path("bad.json");
    write_file(&file, "{ not json");

    let (_stdout, stderr, exit_code) = env.run(&["import", file.to_str().unwrap()]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Could not import"));
    assert!(stderr.contains("sections"));
    assert_eq!(env.read_record(), sample_record());
}

#[test]
fn import_rejects_invalid_link() {
    let env = TestEnv::new();
    let file = env.path("link.json");
    write_file(&file, r#"{"point":"a","referenceLink":"javascript:alert(1)"}"#);

    let (_stdout, stderr, exit_code) = env.run(&["import", file.to_str().unwrap()]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Invalid reference link"));
}

#[test]
fn import_missing_file_fails() {
    let env = TestEnv::new();
    let (_stdout, stderr, exit_code) = env.run(&["import", "/nonexistent/prep.json"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Failed to read"));
}

#[test]
fn library_round_trip_keeps_deck_id() {
    let mut record = sample_record();
    record.deck_id = "deck-42".to_string();
    let json = ExportDocument::new(&record, chrono::Utc::now())
        .to_json_pretty()
        .unwrap();

    let imported: PrepRecord = import_str(&json).unwrap();
    assert_eq!(imported, record);
}
