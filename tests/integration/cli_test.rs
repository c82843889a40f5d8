//! Integration tests for the editing, present and config commands (CLI)

use crate::helpers::{sample_record, TestEnv};

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["show", "set", "edit", "link", "duration", "preset", "present", "export", "import", "cloud", "config"] {
        assert!(stdout.contains(command), "missing {command}");
    }
}

#[test]
fn version_includes_package_version() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["--version"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_prints_help_and_fails() {
    let env = TestEnv::new();
    let (_stdout, stderr, exit_code) = env.run(&[]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Usage"));
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn show_on_fresh_home_lists_empty_sections() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("PREP speech"));
    assert!(stdout.contains("1. Point (15s, 00:00 - 00:15)"));
    assert!(stdout.contains("4. Summary (15s, 00:45 - 01:00)"));
    assert!(stdout.contains("(empty)"));
    assert!(!env.record_path().exists());
}

#[test]
fn set_saves_section_text() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["set", "point", "Ship weekly"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Updated Point."));
    assert_eq!(env.read_record().point, "Ship weekly");

    let (stdout, _, _) = env.run(&["show"]);
    assert!(stdout.contains("   Ship weekly"));
}

#[test]
fn set_reads_stdin_for_dash() {
    let env = TestEnv::new();
    env.cmd()
        .args(["set", "r", "-"])
        .write_stdin("Line one\nLine two\n")
        .assert()
        .success();

    assert_eq!(env.read_record().reason, "Line one\nLine two");
}

#[test]
fn unknown_section_is_rejected() {
    let env = TestEnv::new();
    let (_stdout, stderr, exit_code) = env.run(&["set", "intro", "x"]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("expected point, reason, example or summary"));
}

#[test]
fn edit_without_changes_keeps_record() {
    let env = TestEnv::new();
    env.write_record(&sample_record());

    let (stdout, _stderr, exit_code) = env.run(&["edit", "example"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No changes."));
    assert_eq!(env.read_record(), sample_record());
}

#[test]
fn duration_is_clamped() {
    let env = TestEnv::new();

    let (stdout, _stderr, exit_code) = env.run(&["duration", "reason", "500"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Reason now lasts 90s"));
    assert_eq!(env.read_record().durations.reason, 90);

    env.run(&["duration", "point", "1"]);
    assert_eq!(env.read_record().durations.point, 3);

    env.run(&["duration", "summary", "12.6"]);
    assert_eq!(env.read_record().durations.summary, 13);
}

#[test]
fn preset_replaces_all_durations() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["preset", "extended"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("20/25/25/20s"));
    assert_eq!(env.read_record().durations.total(), 90);
}

#[test]
fn default_preset_applies_to_new_records() {
    let env = TestEnv::new();
    env.write_config("[presentation]\ndefault_preset = \"long\"\n");

    env.run(&["set", "point", "Hello"]);
    assert_eq!(env.read_record().durations.total(), 120);
}

#[test]
fn link_is_validated_and_clearable() {
    let env = TestEnv::new();

    let (_stdout, stderr, exit_code) = env.run(&["link", "not a url"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Invalid reference link"));
    assert!(!env.record_path().exists());

    let (stdout, _stderr, exit_code) = env.run(&["link", "https://example.com/a"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("https://example.com/a"));
    assert_eq!(env.read_record().reference_link, "https://example.com/a");

    let (stdout, _, _) = env.run(&["link"]);
    assert!(stdout.contains("https://example.com/a"));

    env.run(&["link", "--clear"]);
    assert_eq!(env.read_record().reference_link, "");
}

#[test]
fn unreadable_record_falls_back_to_defaults() {
    let env = TestEnv::new();
    crate::helpers::write_file(&env.record_path(), "{ broken");

    let (stdout, stderr, exit_code) = env.run(&["show"]);
    assert_eq!(exit_code, 0);
    assert!(stderr.contains("ignoring unreadable record"));
    assert!(stdout.contains("(empty)"));
}

// ============================================================================
// Present
// ============================================================================

#[test]
fn present_refuses_blank_deck() {
    let env = TestEnv::new();
    let (_stdout, stderr, exit_code) = env.run(&["present"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Nothing to present"));
}

#[test]
fn present_needs_a_terminal() {
    let env = TestEnv::new();
    env.write_record(&sample_record());

    let (_stdout, stderr, exit_code) = env.run(&["present"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("interactive terminal"));
}

// ============================================================================
// Config and completions
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[presentation]"));
    assert!(stdout.contains("frame_interval_ms = 100"));
    assert!(stdout.contains("bucket = \"slidesStorage\""));
}

#[test]
fn config_migrate_declines_without_terminal() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["config", "migrate"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Non-interactive mode"));
    assert!(stdout.contains("No changes made."));
    assert!(!env.config_path().exists());
}

#[test]
fn config_migrate_yes_adds_missing_fields() {
    let env = TestEnv::new();
    env.write_config("# keep me\n[presentation]\nreset_key = \"x\"\n");

    let (stdout, _stderr, exit_code) = env.run(&["config", "migrate", "--yes"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("missing field(s)"));

    let content = std::fs::read_to_string(env.config_path()).unwrap();
    assert!(content.contains("# keep me"));
    assert!(content.contains("reset_key = \"x\""));
    assert!(content.contains("[cloud]"));

    let (stdout, _, _) = env.run(&["config", "migrate"]);
    assert!(stdout.contains("already up to date"));
}

#[test]
fn broken_config_still_allows_commands() {
    let env = TestEnv::new();
    env.write_config("[presentation\n");

    let (_stdout, stderr, exit_code) = env.run(&["show"]);
    assert_eq!(exit_code, 0);
    assert!(stderr.contains("Using default settings"));
}

#[test]
fn completions_for_bash() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("prep"));
    assert!(stdout.contains("complete"));
}

#[test]
fn commands_write_log_file() {
    let env = TestEnv::new();
    env.cmd()
        .env("PREPDECK_LOG", "debug")
        .args(["set", "summary", "Done"])
        .assert()
        .success();

    let log = std::fs::read_to_string(env.home.path().join("data").join("prep.log")).unwrap();
    assert!(log.contains("section text replaced"));
}
