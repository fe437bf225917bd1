//! Print fields in dependency order.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::load_field_set;
use crate::config::EngineConfig;
use crate::resolver::DependencyGraph;

#[derive(Args)]
pub struct OrderCommand {
    /// Form schema to order
    pub schema: PathBuf,
}

impl OrderCommand {
    pub async fn execute(self, config: &EngineConfig) -> Result<()> {
        let (_, set) = load_field_set(&self.schema, config, true).await?;
        let order = DependencyGraph::topological_order(set.fields())?;

        let width = order.len().to_string().len();
        for (i, key) in order.iter().enumerate() {
            let label = set.get(key).map(|field| field.display_label()).unwrap_or_default();
            if label == key.as_str() {
                println!("{:>width$}. {}", i + 1, key);
            } else {
                println!("{:>width$}. {} {}", i + 1, key, format!("({label})").dimmed());
            }
        }
        Ok(())
    }
}
