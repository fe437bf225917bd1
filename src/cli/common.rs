//! Helpers shared by the CLI commands.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use strsim::levenshtein;

use crate::config::EngineConfig;
use crate::form::{FieldSet, FormSchema};

/// Levenshtein distance, as a percentage of the key length, that a
/// "did you mean" suggestion must stay below.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Load a schema file and register its fields.
///
/// Registration honours `detect_cycles_on_register` unless `defer_cycle_check`
/// is set, in which case the caller runs [`FieldSet::check`] itself.
pub async fn load_field_set(
    path: &Path,
    config: &EngineConfig,
    defer_cycle_check: bool,
) -> Result<(FormSchema, FieldSet)> {
    let schema = FormSchema::load(path).await?;
    let mut config = config.clone();
    if defer_cycle_check {
        config.detect_cycles_on_register = false;
    }
    let set = schema.into_field_set(&config)?;
    Ok((schema, set))
}

/// Up to three known keys close to `target`, closest first.
pub fn find_similar_keys<'a>(target: &str, available: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut scored: Vec<(&str, usize)> =
        available.map(|key| (key, levenshtein(target, key))).collect();
    scored.sort_by_key(|(_, distance)| *distance);

    scored
        .into_iter()
        .filter(|(_, distance)| *distance < target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(key, _)| key)
        .collect()
}

pub fn print_warning(message: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), message);
}
