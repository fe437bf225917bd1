//! Command-line interface for fieldgraph.
//!
//! The CLI works on declarative form schemas (see [`crate::form::schema`]) and
//! exposes the engine's operations for inspection and debugging:
//!
//! - `check` - Register every field and report duplicate keys or cycles
//! - `resolve` - Propagate a change and print the resulting field updates
//! - `tree` - Show which fields react to a field, transitively
//! - `order` - Print the fields in dependency order
//!
//! # Example
//!
//! ```bash
//! fieldgraph check address.toml
//! fieldgraph resolve address.toml --changed country --data current.json
//! fieldgraph resolve address.toml --changed country --context filter
//! fieldgraph tree address.toml country
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Disable logging
//! - `--config` - Path to an engine config file instead of `~/.fieldgraph/config.toml`
//!
//! Logging goes to stderr; command output goes to stdout so it can be piped.

mod check;
pub mod common;
mod order;
mod resolve;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;

#[derive(Parser)]
#[command(
    name = "fieldgraph",
    about = "Form field dependency propagation engine",
    version,
    long_about = "fieldgraph computes which form fields must update when other fields change, \
                  and what each of them should become."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the engine config file
    #[arg(short, long, global = true, env = "FIELDGRAPH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a form schema
    Check(check::CheckCommand),

    /// Compute field updates for a change
    Resolve(resolve::ResolveCommand),

    /// Show dependent fields as a tree
    Tree(tree::TreeCommand),

    /// List fields in dependency order
    Order(order::OrderCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = EngineConfig::load_with_optional(self.config.clone()).await?;
        self.init_logging(&config);

        match self.command {
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Resolve(cmd) => cmd.execute(&config).await,
            Commands::Tree(cmd) => cmd.execute(&config).await,
            Commands::Order(cmd) => cmd.execute(&config).await,
        }
    }

    /// The `tracing` filter to install, or `None` for no logging.
    ///
    /// `--quiet` wins, then `--verbose`, then `RUST_LOG`, then the config's
    /// `log_level`, then `warn`.
    #[must_use]
    pub fn log_filter(&self, config: &EngineConfig) -> Option<EnvFilter> {
        if self.quiet {
            return None;
        }
        if self.verbose {
            return Some(EnvFilter::new("fieldgraph=debug"));
        }
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Some(filter);
        }
        Some(EnvFilter::new(config.log_level.as_deref().unwrap_or("warn")))
    }

    fn init_logging(&self, config: &EngineConfig) {
        if let Some(filter) = self.log_filter(config) {
            // A subscriber may already be installed when running in-process.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
    }
}
