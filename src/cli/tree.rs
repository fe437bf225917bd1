//! Display which fields react to a field, transitively.
//!
//! ```text
//! country
//! ├── state
//! │   └── zip
//! └── city
//!     └── zip (seen)
//! ```
//!
//! Without a field argument, one tree is printed per field that depends on no
//! declared field. Dependencies on undeclared keys do not count. Cyclic
//! schemas are accepted; repeated keys are marked `(seen)` instead of expanded.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{find_similar_keys, load_field_set};
use crate::config::EngineConfig;

#[derive(Args)]
pub struct TreeCommand {
    /// Form schema to inspect
    pub schema: PathBuf,

    /// Field to start from
    pub field: Option<String>,
}

impl TreeCommand {
    pub async fn execute(self, config: &EngineConfig) -> Result<()> {
        let (_, set) = load_field_set(&self.schema, config, true).await?;
        let graph = set.graph();

        let roots: Vec<&str> = match &self.field {
            Some(key) => {
                if set.get(key).is_none() {
                    let suggestions = find_similar_keys(key, set.keys());
                    if suggestions.is_empty() {
                        bail!("Field '{key}' is not declared in {}", self.schema.display());
                    }
                    bail!(
                        "Field '{key}' is not declared in {} (did you mean '{}'?)",
                        self.schema.display(),
                        suggestions.join("', '")
                    );
                }
                vec![key.as_str()]
            }
            None => set
                .fields()
                .iter()
                .filter(|field| field.dependencies().iter().all(|dep| set.get(dep).is_none()))
                .map(|field| field.key())
                .collect(),
        };

        if roots.is_empty() {
            println!("{}", "No root fields (every field depends on a declared field)".yellow());
            return Ok(());
        }

        let trees: Vec<String> = roots.iter().map(|root| graph.to_tree_string(root)).collect();
        print!("{}", trees.join("\n"));
        Ok(())
    }
}
