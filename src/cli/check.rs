//! Validate a form schema.
//!
//! Errors (unparsable schema, duplicate keys, circular dependencies) fail the
//! command. Warnings flag things the engine tolerates at runtime but that are
//! usually mistakes: dependencies on undeclared fields, conditions on
//! undeclared fields, and fields that depend on others without reacting to
//! them. `--strict` turns warnings into a failure.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

use super::common::{find_similar_keys, load_field_set};
use crate::config::EngineConfig;
use crate::form::FormSchema;

#[derive(Args)]
pub struct CheckCommand {
    /// Form schema to validate
    pub schema: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub fields: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckCommand {
    pub async fn execute(self, config: &EngineConfig) -> Result<()> {
        let mut report = CheckReport::default();

        match load_field_set(&self.schema, config, true).await {
            Ok((schema, set)) => {
                report.fields = set.len();
                if let Err(err) = set.check() {
                    report.errors.push(err.to_string());
                }
                report.warnings = schema_warnings(&schema);
            }
            Err(err) => report.errors.push(format!("{err:#}")),
        }

        report.valid = report.errors.is_empty() && !(self.strict && !report.warnings.is_empty());
        self.print(&report)?;

        if report.valid {
            Ok(())
        } else if let Some(first) = report.errors.first() {
            Err(anyhow!("{first}"))
        } else {
            Err(anyhow!(
                "{} warning(s) in {} (strict mode)",
                report.warnings.len(),
                self.schema.display()
            ))
        }
    }

    fn print(&self, report: &CheckReport) -> Result<()> {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        for warning in &report.warnings {
            println!("{} {}", "⚠".yellow(), warning);
        }
        for error in &report.errors {
            println!("{} {}", "✗".red(), error);
        }
        if report.valid {
            println!(
                "{} {}: {} field(s), no circular dependencies",
                "✓".green(),
                self.schema.display(),
                report.fields
            );
        }
        Ok(())
    }
}

/// Findings that do not stop the schema from resolving.
fn schema_warnings(schema: &FormSchema) -> Vec<String> {
    let declared: HashSet<&str> = schema.keys().collect();
    let mut warnings = Vec::new();

    let undeclared = |key: &str| {
        let mut message = format!("'{key}' is not a declared field");
        let suggestions = find_similar_keys(key, schema.keys());
        if !suggestions.is_empty() {
            message.push_str(&format!(" (did you mean '{}'?)", suggestions.join("', '")));
        }
        message
    };

    for field in &schema.fields {
        for dependency in &field.depends_on {
            if !declared.contains(dependency.as_str()) {
                warnings.push(format!(
                    "Field '{}' depends on {}",
                    field.key,
                    undeclared(dependency)
                ));
            }
        }

        for reactions in field.on.values() {
            for condition in reactions.iter().filter_map(|r| r.when.as_ref()) {
                if !declared.contains(condition.field.as_str()) {
                    warnings.push(format!(
                        "Field '{}' has a condition on {}",
                        field.key,
                        undeclared(&condition.field)
                    ));
                }
            }
        }

        if !field.depends_on.is_empty() && field.on.is_empty() {
            warnings.push(format!(
                "Field '{}' has dependencies but no reactions; it will never update",
                field.key
            ));
        }
    }

    warnings
}
