//! Shared testing utilities for versecast CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated `$HOME` and OBS environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `versecast` binary.
    ///
    /// OBS variables are cleared and a password is set so no prompt is ever shown.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("versecast").expect("Failed to locate versecast binary");
        cmd.current_dir(self.home())
            .env("HOME", self.home())
            .env_remove("OBS_HOST")
            .env_remove("OBS_PORT")
            .env("OBS_PASSWORD", "")
            .env_remove("GEMINI_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write `content` as a config file in the temp root and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.home().join("versecast.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Write `content` at the default config location.
    pub fn write_default_config(&self, content: &str) {
        let path = self.home().join(".config/versecast/config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).expect("Failed to write default config");
    }

    pub fn plan_path(&self) -> PathBuf {
        self.home().join(".versecast/study_plan.json")
    }

    pub fn read_plan(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.plan_path()).expect("study plan should exist");
        serde_json::from_str(&content).expect("study plan should be JSON")
    }
}

/// `[bible]` section pointing at a mock server root.
#[allow(dead_code)]
pub fn bible_config(server_url: &str) -> String {
    format!("[bible]\nbase_url = \"{}/api/BSB\"\ntimeout_secs = 5\n", server_url)
}

/// A John 3 payload with a heading before verse 16.
#[allow(dead_code)]
pub const JOHN_3: &str = r#"{
  "translation": {"id": "BSB"},
  "book": {"id": "JHN"},
  "chapter": {"number": 3, "content": [
    {"type": "heading", "content": ["For God So Loved the World"]},
    {"type": "verse", "number": 16, "content": ["For God so loved the world that He gave His one and only Son, that everyone who believes in Him shall not perish but have eternal life."]},
    {"type": "verse", "number": 17, "content": ["For God did not send His Son into the world to condemn the world, but to save the world through Him."]}
  ]}
}"#;
