//! Validation rule descriptors.
//!
//! A [`ValidationRule`] is pure metadata: a rule name, its parameters and an
//! optional message. The client (or a [`ValidatorRegistry`]) decides what the
//! name means; nothing here evaluates a rule against a value.
//!
//! [`ValidatorRegistry`]: crate::field::ValidatorRegistry

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::FieldError;

/// One validation rule attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule name, e.g. `required`, `min`, or a custom validator name.
    pub name: String,
    /// Positional parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
    /// Message shown when the rule fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    fn named(name: &str, params: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            params,
            message: None,
        }
    }

    #[must_use]
    pub fn required() -> Self {
        Self::named("required", Vec::new())
    }

    #[must_use]
    pub fn email() -> Self {
        Self::named("email", Vec::new())
    }

    #[must_use]
    pub fn url() -> Self {
        Self::named("url", Vec::new())
    }

    #[must_use]
    pub fn numeric() -> Self {
        Self::named("numeric", Vec::new())
    }

    /// Minimum numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidRule`] for NaN or an infinite bound, which
    /// JSON cannot represent.
    pub fn min(value: f64) -> Result<Self, FieldError> {
        Ok(Self::named("min", vec![finite_bound("min", value)?]))
    }

    /// Maximum numeric value.
    ///
    /// # Errors
    ///
    /// Same as [`min`](Self::min).
    pub fn max(value: f64) -> Result<Self, FieldError> {
        Ok(Self::named("max", vec![finite_bound("max", value)?]))
    }

    #[must_use]
    pub fn min_length(length: usize) -> Self {
        Self::named("min_length", vec![Value::from(length)])
    }

    #[must_use]
    pub fn max_length(length: usize) -> Self {
        Self::named("max_length", vec![Value::from(length)])
    }

    /// Value must be one of `choices`.
    pub fn one_of<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::named("one_of", choices.into_iter().map(Into::into).collect())
    }

    /// Value must match a regular expression.
    ///
    /// The pattern is compiled up front so that a typo is caught when the
    /// rule is declared rather than on the client.
    pub fn pattern(pattern: &str) -> Result<Self, FieldError> {
        Regex::new(pattern).map_err(|e| FieldError::InvalidRule {
            rule: "pattern".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::named("pattern", vec![Value::from(pattern)]))
    }

    /// A rule evaluated by a custom validator of the same name.
    pub fn custom<I, V>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Attach a failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn finite_bound(rule: &str, value: f64) -> Result<Value, FieldError> {
    serde_json::Number::from_f64(value).map(Value::Number).ok_or_else(|| FieldError::InvalidRule {
        rule: rule.to_string(),
        reason: format!("bound must be a finite number, got {value}"),
    })
}
