//! Custom validator registry.
//!
//! Applications register named validators on an explicitly constructed
//! [`ValidatorRegistry`] and pass it to whatever runs validation. There is no
//! process-wide registry, so two forms (or two tests) never see each other's
//! validators.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::ValidationRule;
use crate::core::FieldError;

/// A custom validator: receives the value under test and the rule params.
pub type Validator = Arc<dyn Fn(&Value, &[Value]) -> bool + Send + Sync>;

/// Named custom validators.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Validator>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `validator` under `name`, replacing any previous entry.
    ///
    /// Returns `true` if an existing validator was replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F) -> bool
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!("Registering custom validator '{}'", name);
        let replaced = self.validators.insert(name.clone(), Arc::new(validator)).is_some();
        if replaced {
            tracing::warn!("Custom validator '{}' replaced an existing registration", name);
        }
        replaced
    }

    /// Remove a validator. Returns `true` if it was present.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.validators.remove(name).is_some()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run the validator named by `rule` against `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownValidator`] if nothing is registered under
    /// the rule's name.
    pub fn run(&self, rule: &ValidationRule, value: &Value) -> Result<bool, FieldError> {
        let validator =
            self.validators.get(&rule.name).ok_or_else(|| FieldError::UnknownValidator {
                name: rule.name.clone(),
            })?;
        Ok(validator(value, &rule.params))
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry").field("validators", &self.names()).finish()
    }
}
