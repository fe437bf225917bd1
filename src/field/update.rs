//! Field patches.
//!
//! A [`FieldUpdate`] is the sparse change set a callback returns for one
//! affected field. Every attribute is tri-state:
//!
//! - absent (`None`): leave the client's state alone
//! - present: set the client's state to exactly this value, including
//!   `false`, an empty string, or an empty option list
//!
//! `value` has one more distinction: `Some(Value::Null)` is an explicit
//! "clear the value", which is not the same as not touching it.
//!
//! ```rust
//! use fieldgraph::field::FieldUpdate;
//!
//! let update = FieldUpdate::new().show().make_required();
//! assert_eq!(update.visible, Some(true));
//! assert_eq!(update.required, Some(true));
//! assert_eq!(update.disabled, None);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ValidationRule;

/// Sparse set of attribute changes for one field.
///
/// Serializes with camelCase keys and omits absent attributes, which is the
/// shape the client merges into its field state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Full replacement of a choice field's options (value → label).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexMap<String, String>>,
    /// Programmatic value assignment. `Some(Value::Null)` clears the value.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub value: Option<Value>,
    /// Full replacement of the field's validation rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<ValidationRule>>,
}

// A key that is present maps to Some, even when its value is null.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl FieldUpdate {
    /// An empty patch: every attribute absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn show(self) -> Self {
        self.set_visible(true)
    }

    #[must_use]
    pub fn hide(self) -> Self {
        self.set_visible(false)
    }

    #[must_use]
    pub fn set_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    #[must_use]
    pub fn make_required(self) -> Self {
        self.set_required(true)
    }

    #[must_use]
    pub fn make_optional(self) -> Self {
        self.set_required(false)
    }

    #[must_use]
    pub fn set_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn make_read_only(self) -> Self {
        self.set_read_only(true)
    }

    #[must_use]
    pub fn make_editable(self) -> Self {
        self.set_read_only(false)
    }

    #[must_use]
    pub fn set_read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    #[must_use]
    pub fn disable(self) -> Self {
        self.set_disabled(true)
    }

    #[must_use]
    pub fn enable(self) -> Self {
        self.set_disabled(false)
    }

    #[must_use]
    pub fn set_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    #[must_use]
    pub fn set_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    #[must_use]
    pub fn set_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Replace the option list. An empty iterator clears every option.
    #[must_use]
    pub fn set_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.options = Some(options.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    #[must_use]
    pub fn set_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Explicitly clear the field's value.
    #[must_use]
    pub fn clear_value(mut self) -> Self {
        self.value = Some(Value::Null);
        self
    }

    /// Replace the rule list wholesale.
    #[must_use]
    pub fn set_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Append one rule, keeping any rules already set on this patch.
    #[must_use]
    pub fn add_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule);
        self
    }

    /// Append several rules, keeping any rules already set on this patch.
    #[must_use]
    pub fn add_rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.rules.get_or_insert_with(Vec::new).extend(rules);
        self
    }

    /// `true` if no attribute is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the present attributes to `state`, leaving the rest untouched.
    pub fn apply_to(&self, state: &mut FieldState) {
        if let Some(visible) = self.visible {
            state.visible = visible;
        }
        if let Some(read_only) = self.read_only {
            state.read_only = read_only;
        }
        if let Some(required) = self.required {
            state.required = required;
        }
        if let Some(disabled) = self.disabled {
            state.disabled = disabled;
        }
        if let Some(help_text) = &self.help_text {
            state.help_text.clone_from(help_text);
        }
        if let Some(placeholder) = &self.placeholder {
            state.placeholder.clone_from(placeholder);
        }
        if let Some(options) = &self.options {
            state.options.clone_from(options);
        }
        if let Some(value) = &self.value {
            state.value.clone_from(value);
        }
        if let Some(rules) = &self.rules {
            state.rules.clone_from(rules);
        }
    }
}

/// Client-visible state of one field, the target a [`FieldUpdate`] is applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub visible: bool,
    pub read_only: bool,
    pub required: bool,
    pub disabled: bool,
    pub help_text: String,
    pub placeholder: String,
    pub options: IndexMap<String, String>,
    pub value: Value,
    pub rules: Vec<ValidationRule>,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            visible: true,
            read_only: false,
            required: false,
            disabled: false,
            help_text: String::new(),
            placeholder: String::new(),
            options: IndexMap::new(),
            value: Value::Null,
            rules: Vec::new(),
        }
    }
}
