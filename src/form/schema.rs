//! Declarative form schemas.
//!
//! A schema describes fields and their reactions in TOML instead of code.
//! Each reaction is an optional [`Condition`] on the form data plus the
//! [`FieldUpdate`] to emit when it holds; the first matching reaction wins
//! and no match means no change.
//!
//! ```toml
//! [[fields]]
//! key = "country"
//!
//! [[fields]]
//! key = "state"
//! label = "State"
//! depends_on = ["country"]
//!
//! [[fields.on.form]]
//! when = { field = "country", equals = "US" }
//! update = { visible = true, required = true }
//!
//! [[fields.on.form]]
//! update = { visible = false, required = false, value = "" }
//! ```

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use super::FieldSet;
use crate::config::EngineConfig;
use crate::core::FieldError;
use crate::field::{Field, FieldContext, FieldUpdate, FormData};

/// A whole form: fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One field of a [`FormSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Reactions per context, tried in order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub on: IndexMap<FieldContext, Vec<Reaction>>,
}

/// An update emitted when its condition holds (or unconditionally).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Condition>,
    #[serde(default)]
    pub update: FieldUpdate,
}

/// A predicate over one field's current value.
///
/// Every predicate that is present must hold. A key missing from the form
/// data is treated as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equals: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
}

impl Condition {
    #[must_use]
    pub fn matches(&self, data: &FormData) -> bool {
        let value = data.get(&self.field).unwrap_or(&Value::Null);

        if let Some(expected) = &self.equals
            && value != expected
        {
            return false;
        }
        if let Some(rejected) = &self.not_equals
            && value == rejected
        {
            return false;
        }
        if let Some(empty) = self.is_empty
            && is_empty_value(value) != empty
        {
            return false;
        }
        true
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

impl Reaction {
    #[must_use]
    pub fn applies_to(&self, data: &FormData) -> bool {
        self.when.as_ref().is_none_or(|condition| condition.matches(data))
    }
}

impl FieldSchema {
    /// Build a [`Field`] whose callbacks evaluate this schema's reactions.
    #[must_use]
    pub fn to_field<C: 'static>(&self) -> Field<C> {
        let mut field = Field::new(self.key.clone()).depends_on(self.depends_on.iter().cloned());
        if let Some(label) = &self.label {
            field = field.label(label.clone());
        }

        for (context, reactions) in &self.on {
            let reactions = Arc::new(reactions.clone());
            field = field.on(context.clone(), move |_: &Field<C>, data: &FormData, _: &C| {
                reactions
                    .iter()
                    .find(|reaction| reaction.applies_to(data))
                    .map(|reaction| reaction.update.clone())
            });
        }
        field
    }
}

impl FormSchema {
    /// Parse a schema from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::SchemaParseError`] for invalid TOML or a field
    /// with an empty key.
    pub fn from_toml_str(content: &str, file: &str) -> Result<Self, FieldError> {
        let schema: Self = toml::from_str(content).map_err(|e| FieldError::SchemaParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(index) = schema.fields.iter().position(|f| f.key.trim().is_empty()) {
            return Err(FieldError::SchemaParseError {
                file: file.to_string(),
                reason: format!("field #{} has an empty key", index + 1),
            });
        }

        Ok(schema)
    }

    /// Load a schema file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read form schema from {}", path.display()))?;

        Ok(Self::from_toml_str(&content, &path.display().to_string())?)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    /// Register every field into a new [`FieldSet`].
    ///
    /// # Errors
    ///
    /// Propagates the first registration failure (duplicate key or cycle).
    pub fn into_field_set<C: 'static>(&self, config: &EngineConfig) -> Result<FieldSet<C>, FieldError> {
        let mut set = FieldSet::from_config(config);
        set.extend(self.fields.iter().map(FieldSchema::to_field))?;
        Ok(set)
    }
}
