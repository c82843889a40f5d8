//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use prepdeck::deck::PrepRecord;

/// An isolated `PREPDECK_HOME`.
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// `prep` bound to this environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("prep").expect("prep binary not built");
        cmd.env("PREPDECK_HOME", self.home.path())
            .env("EDITOR", "true")
            .env_remove("PREPDECK_LOG");
        cmd
    }

    /// Run `prep` and capture (stdout, stderr, exit code).
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self.cmd().args(args).output().expect("Failed to execute prep");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    pub fn record_path(&self) -> PathBuf {
        self.home.path().join("data").join("prep.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("config").join("config.toml")
    }

    pub fn read_record(&self) -> PrepRecord {
        let content = fs::read_to_string(self.record_path()).expect("record not written");
        serde_json::from_str(&content).expect("record is not valid JSON")
    }

    pub fn write_record(&self, record: &PrepRecord) {
        write_file(&self.record_path(), &serde_json::to_string(record).unwrap());
    }

    pub fn write_config(&self, content: &str) {
        write_file(&self.config_path(), content);
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A record with text in every section.
pub fn sample_record() -> PrepRecord {
    PrepRecord {
        point: "Ship weekly".to_string(),
        reason: "Small batches fail small".to_string(),
        example: "Team A halved incidents".to_string(),
        summary: "So ship weekly".to_string(),
        reference_link: "https://example.com/report".to_string(),
        ..PrepRecord::default()
    }
}
