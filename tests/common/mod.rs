//! Shared helpers for the integration suite.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding schemas, data files and an isolated engine
/// config, so tests never read `~/.fieldgraph/config.toml`.
pub struct TestProject {
    temp: TempDir,
    config_path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        Self::with_config("")
    }

    pub fn with_config(config: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, config).unwrap();
        Self {
            temp,
            config_path,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// A `fieldgraph` command using this project's config.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("fieldgraph").unwrap();
        cmd.current_dir(self.path())
            .env("FIELDGRAPH_CONFIG", &self.config_path)
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

pub const CYCLIC_SCHEMA: &str = r#"
[[fields]]
key = "a"
depends_on = ["c"]

[[fields.on.form]]
update = { visible = true }

[[fields]]
key = "b"
depends_on = ["a"]

[[fields.on.form]]
update = { visible = true }

[[fields]]
key = "c"
depends_on = ["b"]

[[fields.on.form]]
update = { visible = true }
"#;
