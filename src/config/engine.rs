//! Engine configuration.
//!
//! Stored as TOML, by default at `~/.fieldgraph/config.toml`
//! (`%LOCALAPPDATA%\fieldgraph\config.toml` on Windows). A missing file is not
//! an error; every key has a default.
//!
//! ```toml
//! # Context used when none is given on the command line
//! default_context = "form"
//!
//! # Reject cyclic registrations immediately
//! detect_cycles_on_register = true
//!
//! # tracing filter directive, overridden by RUST_LOG and --verbose/--quiet
//! log_level = "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::field::FieldContext;

const fn default_detect_cycles() -> bool {
    true
}

/// Settings shared by the library's registration layer and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Context used when a resolution does not name one.
    #[serde(default)]
    pub default_context: FieldContext,

    /// Run cycle detection on every [`FieldSet::register`](crate::form::FieldSet::register).
    ///
    /// When disabled, callers are expected to run
    /// [`FieldSet::check`](crate::form::FieldSet::check) themselves once the
    /// form is complete.
    #[serde(default = "default_detect_cycles")]
    pub detect_cycles_on_register: bool,

    /// Default `tracing` filter for the CLI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_context: FieldContext::Form,
            detect_cycles_on_register: default_detect_cycles(),
            log_level: None,
        }
    }
}

impl EngineConfig {
    /// Load from the default location, or defaults if there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// An explicitly given path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => Self::load().await,
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Write the configuration as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Platform default config path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("fieldgraph")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".fieldgraph")
        };

        Ok(config_dir.join("config.toml"))
    }
}
