//! Configuration management for fieldgraph.
//!
//! - `engine` - [`EngineConfig`]: default context, registration-time cycle
//!   checks and the CLI log level, loaded from `~/.fieldgraph/config.toml`
//!   or a path given with `--config`.

pub mod engine;

pub use engine::EngineConfig;
