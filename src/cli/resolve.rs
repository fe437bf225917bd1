//! Compute the updates a change produces.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::common::{find_similar_keys, load_field_set, print_warning};
use crate::config::EngineConfig;
use crate::field::{FieldContext, FormData};

#[derive(Args)]
pub struct ResolveCommand {
    /// Form schema to resolve against
    pub schema: PathBuf,

    /// Keys of the fields that changed (comma-separated or repeated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub changed: Vec<String>,

    /// Context to resolve in (defaults to the configured default context)
    #[arg(long)]
    pub context: Option<FieldContext>,

    /// JSON file holding the current form values as an object
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl ResolveCommand {
    pub async fn execute(self, config: &EngineConfig) -> Result<()> {
        let (_, set) = load_field_set(&self.schema, config, false).await?;

        for key in &self.changed {
            if set.get(key).is_none() {
                let mut message = format!("Changed field '{key}' is not declared in the schema");
                let suggestions = find_similar_keys(key, set.keys());
                if !suggestions.is_empty() {
                    message.push_str(&format!("; did you mean '{}'?", suggestions.join("', '")));
                }
                print_warning(&message);
            }
        }

        let form_data = match &self.data {
            Some(path) => load_form_data(path).await?,
            None => FormData::new(),
        };

        let context = self.context.clone().unwrap_or_else(|| config.default_context.clone());
        debug!("Resolving {:?} in context '{}'", self.changed, context);

        let updates = set.resolve(context, &form_data, self.changed.as_slice(), &());

        let output = if self.compact {
            serde_json::to_string(&updates)?
        } else {
            serde_json::to_string_pretty(&updates)?
        };
        println!("{output}");
        Ok(())
    }
}

async fn load_form_data(path: &Path) -> Result<FormData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read form data from {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse form data from {}", path.display()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Form data in {} must be a JSON object, found {}",
            path.display(),
            json_type_name(&other)
        ),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
